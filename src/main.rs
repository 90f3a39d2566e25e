mod app;
mod calendar;
mod config;
mod help;
mod logging;
mod notes;
mod render;
mod theme;
mod wrap;
use crate::app::{App, Summary};
use crate::config::{parse_line_height, parse_month, parse_year, Overrides};
use crate::theme::PageStyle;
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;
use time::{Date, OffsetDateTime};
use tracing::warn;

#[derive(Clone, Debug, PartialEq)]
enum Command {
    Run { overrides: Overrides, verbosity: u8 },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut overrides = Overrides::default();
        let mut verbosity = 0u8;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('n') | Arg::Long("months") => {
                    overrides.months = Some(parser.value()?.parse()?);
                }
                Arg::Short('m') | Arg::Long("month") => {
                    overrides.month = Some(parser.value()?.parse_with(parse_month)?);
                }
                Arg::Short('y') | Arg::Long("year") => {
                    overrides.year = Some(parser.value()?.parse_with(parse_year)?);
                }
                Arg::Short('w') | Arg::Long("week-start") => {
                    overrides.week_start = Some(parser.value()?.parse()?);
                }
                Arg::Short('l') | Arg::Long("line-height") => {
                    overrides.note_line_height =
                        Some(parser.value()?.parse_with(parse_line_height)?);
                }
                Arg::Short('N') | Arg::Long("notes") => {
                    overrides.notes = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('o') | Arg::Long("output-dir") => {
                    overrides.output_dir = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('v') | Arg::Long("verbose") => {
                    verbosity = verbosity.saturating_add(1);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            overrides,
            verbosity,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                overrides,
                verbosity,
            } => {
                logging::init(verbosity);
                let config = overrides.resolve(local_today())?;
                let style = PageStyle::DEFAULT;
                let generated = App::new(&config, &style).run()?;
                println!("{}", Summary(&generated));
                Ok(())
            }
            Command::Help => {
                print!("{}", help::usage());
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn local_today() -> Date {
    match OffsetDateTime::now_local() {
        Ok(now) => now.date(),
        Err(e) => {
            warn!(error = %e, "failed to determine local date; using UTC");
            OffsetDateTime::now_utc().date()
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekStart;
    use std::num::NonZeroUsize;
    use time::Month;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        let cmd = parse(&[]).expect("no arguments should parse");
        assert_eq!(
            cmd,
            Command::Run {
                overrides: Overrides::default(),
                verbosity: 0,
            }
        );
    }

    #[test]
    fn test_all_short_options() {
        let cmd = parse(&[
            "-n", "12", "-m", "3", "-y", "2026", "-w", "sunday", "-l", "24.5", "-N",
            "notes.csv", "-o", "out", "-vv",
        ])
        .expect("arguments should parse");
        assert_eq!(
            cmd,
            Command::Run {
                overrides: Overrides {
                    months: NonZeroUsize::new(12),
                    month: Some(Month::March),
                    year: Some(2026),
                    week_start: Some(WeekStart::Sunday),
                    note_line_height: Some(24.5),
                    notes: Some(PathBuf::from("notes.csv")),
                    output_dir: Some(PathBuf::from("out")),
                },
                verbosity: 2,
            }
        );
    }

    #[test]
    fn test_long_options() {
        let cmd = parse(&[
            "--months=2",
            "--month",
            "12",
            "--year=1999",
            "--week-start",
            "Mon",
            "--output-dir",
            "pages",
            "--verbose",
        ])
        .expect("arguments should parse");
        assert_eq!(
            cmd,
            Command::Run {
                overrides: Overrides {
                    months: NonZeroUsize::new(2),
                    month: Some(Month::December),
                    year: Some(1999),
                    week_start: Some(WeekStart::Monday),
                    output_dir: Some(PathBuf::from("pages")),
                    ..Overrides::default()
                },
                verbosity: 1,
            }
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).ok(), Some(Command::Help));
        assert_eq!(parse(&["-m", "4", "-h"]).ok(), Some(Command::Help));
        assert_eq!(parse(&["-V"]).ok(), Some(Command::Version));
    }

    #[test]
    fn test_rejects_malformed_values() {
        for args in [
            &["-m", "13"][..],
            &["-m", "March"],
            &["-n", "0"],
            &["-n", "-2"],
            &["-y", "twenty"],
            &["-y", "10000"],
            &["-w", "friday"],
            &["-l", "0"],
            &["-l", "-5"],
            &["--bogus"],
            &["stray"],
            &["-m"],
        ] {
            assert!(parse(args).is_err(), "{args:?} should be rejected");
        }
    }
}

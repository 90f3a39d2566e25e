use crate::calendar::YearMonth;
use crate::config::CalendarConfig;
use crate::notes::NoteIndex;
use crate::render::render_month;
use crate::theme::PageStyle;
use anyhow::Context;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Drives the generation of one calendar page per requested month
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct App<'a> {
    config: &'a CalendarConfig,
    style: &'a PageStyle,
    notes: NoteIndex,
}

impl<'a> App<'a> {
    pub(crate) fn new(config: &'a CalendarConfig, style: &'a PageStyle) -> App<'a> {
        let notes = match config.notes.as_deref() {
            Some(path) => NoteIndex::load(path),
            None => NoteIndex::default(),
        };
        App {
            config,
            style,
            notes,
        }
    }

    /// Renders and writes out every month in order, stopping at the first
    /// failure
    pub(crate) fn run(&self) -> anyhow::Result<Vec<Generated>> {
        let months = self.config.start.take_months(self.config.months)?;
        let outdir = &self.config.output_dir;
        fs::create_dir_all(outdir)
            .with_context(|| format!("failed to create directory {}", outdir.display()))?;
        info!(
            start = %self.config.start,
            months = months.len(),
            week_start = %self.config.week_start,
            "generating calendar pages"
        );
        let mut generated = Vec::with_capacity(months.len());
        for ym in months {
            let note = self.notes.get(ym);
            let has_note = note.is_some_and(|n| !n.trim().is_empty());
            let page = render_month(ym, note, self.config, self.style);
            let path = outdir.join(&page.filename);
            fs::write(&path, page.body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
            debug!(month = %ym, path = %path.display(), has_note, "wrote page");
            generated.push(Generated {
                month: ym,
                path,
                has_note,
            });
        }
        Ok(generated)
    }
}

/// Record of a page that was written
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Generated {
    pub(crate) month: YearMonth,
    pub(crate) path: PathBuf,
    pub(crate) has_note: bool,
}

/// End-of-run report listing every page written
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Summary<'a>(pub(crate) &'a [Generated]);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qty = self.0.len();
        let pages = if qty == 1 { "page" } else { "pages" };
        write!(f, "Generated {qty} calendar {pages}:")?;
        for g in self.0 {
            write!(f, "\n  {}: {}", g.month, g.path.display())?;
            if g.has_note {
                write!(f, " (with note)")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekStart;
    use std::num::NonZeroUsize;
    use time::Month;

    fn config(start: YearMonth, months: usize, output_dir: PathBuf) -> CalendarConfig {
        CalendarConfig {
            start,
            months: NonZeroUsize::new(months).expect("month count should be nonzero"),
            week_start: WeekStart::Monday,
            note_line_height: 30.0,
            notes: None,
            output_dir,
        }
    }

    fn year_month(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).expect("test year should be in range")
    }

    #[test]
    fn test_writes_one_file_per_month() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let outdir = tmp.path().join("out");
        let config = config(year_month(2024, Month::November), 3, outdir.clone());
        let generated = App::new(&config, &PageStyle::DEFAULT)
            .run()
            .expect("generation should succeed");
        let names = generated
            .iter()
            .map(|g| g.path.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                outdir.join("calendar_november_2024.svg"),
                outdir.join("calendar_december_2024.svg"),
                outdir.join("calendar_january_2025.svg"),
            ]
        );
        for g in &generated {
            let body = fs::read_to_string(&g.path).expect("read generated page");
            assert!(body.starts_with("<?xml"));
            assert!(body.trim_end().ends_with("</svg>"));
            assert!(!g.has_note);
        }
    }

    #[test]
    fn test_notes_applied_from_file() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let csv = tmp.path().join("notes.csv");
        fs::write(
            &csv,
            "month,note\nMarch 2025,Spring cleaning & tidying\nnonsense,ignored\n",
        )
        .expect("write notes");
        let mut config = config(year_month(2025, Month::February), 2, tmp.path().to_owned());
        config.notes = Some(csv);
        let generated = App::new(&config, &PageStyle::DEFAULT)
            .run()
            .expect("generation should succeed");
        let flags = generated.iter().map(|g| g.has_note).collect::<Vec<_>>();
        assert_eq!(flags, [false, true]);
        let march = fs::read_to_string(tmp.path().join("calendar_march_2025.svg"))
            .expect("read March page");
        assert!(march.contains("Spring cleaning &amp; tidying"));
        let february = fs::read_to_string(tmp.path().join("calendar_february_2025.svg"))
            .expect("read February page");
        assert!(!february.contains("id=\"note\""));
    }

    #[test]
    fn test_missing_note_file_is_not_fatal() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let mut config = config(year_month(2025, Month::June), 1, tmp.path().to_owned());
        config.notes = Some(tmp.path().join("absent.csv"));
        let generated = App::new(&config, &PageStyle::DEFAULT)
            .run()
            .expect("generation should succeed");
        assert_eq!(generated.len(), 1);
    }

    #[test]
    fn test_blank_note_not_reported() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let csv = tmp.path().join("notes.csv");
        fs::write(&csv, "month,note\nJune 2025,\"   \"\n").expect("write notes");
        let mut config = config(year_month(2025, Month::June), 1, tmp.path().to_owned());
        config.notes = Some(csv);
        let generated = App::new(&config, &PageStyle::DEFAULT)
            .run()
            .expect("generation should succeed");
        assert!(generated.iter().all(|g| !g.has_note));
    }

    #[test]
    fn test_end_of_time() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let config = config(year_month(9999, Month::December), 2, tmp.path().to_owned());
        let r = App::new(&config, &PageStyle::DEFAULT).run();
        let e = r.expect_err("running past December 9999 should fail");
        assert_eq!(e.to_string(), "reached the end of time");
        assert!(!tmp.path().join("calendar_december_9999.svg").exists());
    }

    #[test]
    fn test_summary() {
        let generated = [
            Generated {
                month: year_month(2025, Month::January),
                path: PathBuf::from("out/calendar_january_2025.svg"),
                has_note: false,
            },
            Generated {
                month: year_month(2025, Month::February),
                path: PathBuf::from("out/calendar_february_2025.svg"),
                has_note: true,
            },
        ];
        assert_eq!(
            Summary(&generated).to_string(),
            concat!(
                "Generated 2 calendar pages:\n",
                "  January 2025: out/calendar_january_2025.svg\n",
                "  February 2025: out/calendar_february_2025.svg (with note)",
            )
        );
    }

    #[test]
    fn test_summary_single_page() {
        let generated = [Generated {
            month: year_month(2025, Month::January),
            path: PathBuf::from("calendar_january_2025.svg"),
            has_note: false,
        }];
        assert_eq!(
            Summary(&generated).to_string(),
            "Generated 1 calendar page:\n  January 2025: calendar_january_2025.svg"
        );
    }
}

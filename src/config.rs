use crate::calendar::{WeekStart, YearMonth};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use thiserror::Error;
use time::{Date, Month};

pub(crate) const DEFAULT_NOTE_LINE_HEIGHT: f64 = 30.0;

/// Everything needed to generate a run of calendar pages, fixed before the
/// first page is rendered
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CalendarConfig {
    pub(crate) start: YearMonth,
    pub(crate) months: NonZeroUsize,
    pub(crate) week_start: WeekStart,
    /// Vertical distance in pixels between successive lines of a note
    pub(crate) note_line_height: f64,
    /// CSV file of per-month notes
    pub(crate) notes: Option<PathBuf>,
    pub(crate) output_dir: PathBuf,
}

/// Settings supplied on the command line.  Anything left as `None` falls back
/// to its default when resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) months: Option<NonZeroUsize>,
    pub(crate) month: Option<Month>,
    pub(crate) year: Option<i32>,
    pub(crate) week_start: Option<WeekStart>,
    pub(crate) note_line_height: Option<f64>,
    pub(crate) notes: Option<PathBuf>,
    pub(crate) output_dir: Option<PathBuf>,
}

impl Overrides {
    /// Merges the overrides over the defaults.  `today` supplies the default
    /// starting month and year.
    pub(crate) fn resolve(self, today: Date) -> Result<CalendarConfig, ConfigError> {
        let (this_year, this_month, _) = today.to_calendar_date();
        let month = self.month.unwrap_or(this_month);
        let year = self.year.unwrap_or(this_year);
        let start = YearMonth::new(year, month).map_err(|_| ConfigError::YearOutOfRange(year))?;
        Ok(CalendarConfig {
            start,
            months: self.months.unwrap_or(NonZeroUsize::MIN),
            week_start: self.week_start.unwrap_or_default(),
            note_line_height: self.note_line_height.unwrap_or(DEFAULT_NOTE_LINE_HEIGHT),
            notes: self.notes,
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("invalid month {0:?}; expected a number from 1 to 12")]
    InvalidMonth(String),
    #[error("invalid line height {0:?}; expected a positive number of pixels")]
    InvalidLineHeight(String),
    #[error("invalid year {0:?}; expected an integer")]
    InvalidYear(String),
    #[error("year {0} is outside the supported range")]
    YearOutOfRange(i32),
}

pub(crate) fn parse_month(s: &str) -> Result<Month, ConfigError> {
    s.trim()
        .parse::<u8>()
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .ok_or_else(|| ConfigError::InvalidMonth(s.to_owned()))
}

pub(crate) fn parse_year(s: &str) -> Result<i32, ConfigError> {
    let year = s
        .trim()
        .parse::<i32>()
        .map_err(|_| ConfigError::InvalidYear(s.to_owned()))?;
    match YearMonth::new(year, Month::January) {
        Ok(_) => Ok(year),
        Err(_) => Err(ConfigError::YearOutOfRange(year)),
    }
}

pub(crate) fn parse_line_height(s: &str) -> Result<f64, ConfigError> {
    match s.trim().parse::<f64>() {
        Ok(px) if px.is_finite() && px > 0.0 => Ok(px),
        _ => Err(ConfigError::InvalidLineHeight(s.to_owned())),
    }
}

use std::fmt;
use std::iter::successors;
use std::str::FromStr;
use thiserror::Error;
use time::Weekday;

pub(crate) const DAYS_IN_WEEK: u8 = 7;

/// The weekday in the first column of each calendar row
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub(crate) fn first_weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Monday,
            WeekStart::Sunday => Weekday::Sunday,
        }
    }

    /// The days of the week in column order
    pub(crate) fn weekdays(self) -> impl Iterator<Item = Weekday> {
        successors(Some(self.first_weekday()), |wd| Some(wd.next())).take(DAYS_IN_WEEK.into())
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Monday => write!(f, "monday"),
            WeekStart::Sunday => write!(f, "sunday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = ParseWeekStartError;

    fn from_str(s: &str) -> Result<WeekStart, ParseWeekStartError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            _ => Err(ParseWeekStartError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid week start {0:?}; expected \"monday\" or \"sunday\"")]
pub(crate) struct ParseWeekStartError(String);

pub(crate) trait WeekdayExt {
    /// Column occupied by the weekday in a row beginning on `week_start`
    fn column(&self, week_start: WeekStart) -> u8;

    /// One-letter label used in the header row
    fn initial(&self) -> char;
}

impl WeekdayExt for Weekday {
    fn column(&self, week_start: WeekStart) -> u8 {
        match week_start {
            WeekStart::Monday => self.number_days_from_monday(),
            WeekStart::Sunday => self.number_days_from_sunday(),
        }
    }

    fn initial(&self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday | Weekday::Thursday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Friday => 'F',
            Weekday::Saturday | Weekday::Sunday => 'S',
        }
    }
}

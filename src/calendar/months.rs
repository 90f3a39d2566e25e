use std::fmt;
use std::iter::successors;
use std::num::NonZeroUsize;
use thiserror::Error;
use time::{error::ComponentRange, Date, Month};

/// A month of a particular year
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
// Invariant: The wrapped date is always the first day of its month
pub(crate) struct YearMonth(Date);

impl YearMonth {
    /// Fails if `year` lies outside the range of dates that can be
    /// represented
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, ComponentRange> {
        Date::from_calendar_date(year, month, 1).map(YearMonth)
    }

    #[cfg(test)]
    pub(crate) fn containing(date: Date) -> YearMonth {
        YearMonth(date.replace_day(1).expect("every month should have a first day"))
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(self) -> Month {
        self.0.month()
    }

    pub(crate) fn first_day(self) -> Date {
        self.0
    }

    /// Returns `None` at the end of time
    pub(crate) fn next(self) -> Option<YearMonth> {
        let month = self.month().next();
        let year = if month == Month::January {
            self.year().checked_add(1)?
        } else {
            self.year()
        };
        YearMonth::new(year, month).ok()
    }

    pub(crate) fn iter_from(self) -> impl Iterator<Item = YearMonth> {
        successors(Some(self), |&ym| ym.next())
    }

    /// Returns `qty` consecutive months, the first of which is `self`
    pub(crate) fn take_months(self, qty: NonZeroUsize) -> Result<Vec<YearMonth>, OutOfTimeError> {
        let months = self.iter_from().take(qty.get()).collect::<Vec<_>>();
        if months.len() == qty.get() {
            Ok(months)
        } else {
            Err(OutOfTimeError)
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month(), self.year())
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

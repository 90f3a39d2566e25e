use super::months::YearMonth;
use super::util::{WeekStart, WeekdayExt, DAYS_IN_WEEK};

/// Shape of one month's grid of day cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthLayout {
    /// Number of week rows needed to show every day of the month
    pub(crate) weeks: u8,
    /// Column (0-6) of the first day of the month within the first row
    pub(crate) starting_weekday: u8,
    pub(crate) last_day: u8,
}

/// A single day number and the grid cell it occupies
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) row: u8,
    pub(crate) column: u8,
    pub(crate) day: u8,
}

impl MonthLayout {
    /// Walks the grid row by row, assigning day numbers to cells from the
    /// starting weekday onwards.  Rows are abandoned as soon as the month has
    /// run out of days.
    pub(crate) fn day_cells(&self) -> Vec<DayCell> {
        let mut cells = Vec::with_capacity(usize::from(self.last_day));
        let mut day = 1;
        for row in 0..self.weeks {
            if day > self.last_day {
                break;
            }
            for column in 0..DAYS_IN_WEEK {
                let index = u16::from(row) * u16::from(DAYS_IN_WEEK) + u16::from(column);
                if index >= u16::from(self.starting_weekday) && day <= self.last_day {
                    cells.push(DayCell { row, column, day });
                    day += 1;
                }
            }
        }
        cells
    }
}

pub(crate) fn compute_layout(ym: YearMonth, week_start: WeekStart) -> MonthLayout {
    let first = ym.first_day();
    let last_day = ym.month().length(ym.year());
    let starting_weekday = first.weekday().column(week_start);
    let weeks = (starting_weekday + last_day).div_ceil(DAYS_IN_WEEK);
    debug_assert!(
        (4..=6).contains(&weeks),
        "a month should always span 4 to 6 weeks, got {weeks}"
    );
    MonthLayout {
        weeks,
        starting_weekday,
        last_day,
    }
}

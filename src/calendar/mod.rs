mod layout;
mod months;
mod util;
pub(crate) use self::layout::{compute_layout, MonthLayout};
pub(crate) use self::months::YearMonth;
pub(crate) use self::util::{WeekStart, WeekdayExt};

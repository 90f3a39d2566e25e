use crate::calendar::YearMonth;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::parsing::Parsed;
use time::Date;

/// Ways of writing a month that are recognized in a note file, tried in order
static MONTH_FORMATS: &[&[BorrowedFormatItem<'_>]] = &[
    format_description!("[month repr:long case_sensitive:false] [year]"),
    format_description!("[month repr:short case_sensitive:false] [year]"),
    format_description!("[month repr:long case_sensitive:false] [day padding:none], [year]"),
    format_description!("[month repr:short case_sensitive:false] [day padding:none], [year]"),
    format_description!("[day padding:none] [month repr:long case_sensitive:false] [year]"),
    format_description!("[day padding:none] [month repr:short case_sensitive:false] [year]"),
    format_description!("[year]-[month]-[day]"),
    format_description!("[year]-[month]"),
    format_description!("[month padding:none]/[day padding:none]/[year]"),
    format_description!("[month padding:none]/[year]"),
];

/// Parses a loosely written date such as "March 2025", "mar 2025",
/// "March 14, 2025", or "2025-03" into the month it falls in.  A day, when
/// given, must exist in that month.
pub(super) fn parse_month_expression(s: &str) -> Option<YearMonth> {
    let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
    MONTH_FORMATS.iter().find_map(|&items| {
        let mut parsed = Parsed::new();
        let rest = parsed.parse_items(normalized.as_bytes(), items).ok()?;
        if !rest.is_empty() {
            return None;
        }
        let ym = YearMonth::new(parsed.year()?, parsed.month()?).ok()?;
        if let Some(day) = parsed.day() {
            Date::from_calendar_date(ym.year(), ym.month(), day.get()).ok()?;
        }
        Some(ym)
    })
}

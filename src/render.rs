use crate::calendar::{compute_layout, MonthLayout, WeekStart, WeekdayExt, YearMonth};
use crate::config::CalendarConfig;
use crate::theme::PageStyle;
use crate::wrap::wrap;
use std::fmt;
use std::iter::zip;

static IMPORTANT_DATES_LABEL: &str = "Important Dates";

/// A finished calendar page, ready to be written out
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RenderedMonth {
    pub(crate) filename: String,
    pub(crate) body: String,
}

pub(crate) fn render_month(
    ym: YearMonth,
    note: Option<&str>,
    config: &CalendarConfig,
    style: &PageStyle,
) -> RenderedMonth {
    let layout = compute_layout(ym, config.week_start);
    RenderedMonth {
        filename: filename(ym),
        body: compose(ym, &layout, note, config, style),
    }
}

pub(crate) fn filename(ym: YearMonth) -> String {
    let month = ym.month().to_string().to_lowercase();
    format!("calendar_{month}_{}.svg", ym.year())
}

/// Produces the SVG document for a single month.  A note that is absent or
/// blank leaves no trace in the output.
pub(crate) fn compose(
    ym: YearMonth,
    layout: &MonthLayout,
    note: Option<&str>,
    config: &CalendarConfig,
    style: &PageStyle,
) -> String {
    let note_lines = match note {
        Some(text) if !text.trim().is_empty() => wrap(text, style.note_wrap_length)
            .take(style.max_note_lines)
            .collect(),
        _ => Vec::new(),
    };
    Page {
        ym,
        layout,
        note_lines,
        week_start: config.week_start,
        note_line_height: config.note_line_height,
        style,
    }
    .to_string()
}

#[derive(Clone, Debug, PartialEq)]
struct Page<'a> {
    ym: YearMonth,
    layout: &'a MonthLayout,
    note_lines: Vec<String>,
    week_start: WeekStart,
    note_line_height: f64,
    style: &'a PageStyle,
}

impl Page<'_> {
    fn write_defs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.style;
        let [title_font, text_font, number_font] = style.fonts;
        writeln!(f, "<defs>")?;
        writeln!(f, "<style type=\"text/css\"><![CDATA[")?;
        for font in style.fonts {
            writeln!(
                f,
                "@font-face {{ font-family: '{}'; src: url('{}'); }}",
                font.name, font.path
            )?;
        }
        writeln!(
            f,
            ".title {{ font-family: {title_font}; font-size: 64px; fill: {}; text-anchor: middle; }}",
            style.ink
        )?;
        writeln!(
            f,
            ".note {{ font-family: {text_font}; font-size: 22px; font-style: italic; fill: {}; text-anchor: middle; }}",
            style.muted
        )?;
        writeln!(
            f,
            ".day-header {{ font-family: {text_font}; font-size: 28px; font-weight: bold; fill: {}; text-anchor: middle; }}",
            style.ink
        )?;
        writeln!(
            f,
            ".day-number {{ font-family: {number_font}; font-size: 36px; fill: {}; text-anchor: middle; }}",
            style.ink
        )?;
        writeln!(
            f,
            ".important-header {{ font-family: {title_font}; font-size: 30px; fill: {}; }}",
            style.ink
        )?;
        writeln!(
            f,
            ".important-line {{ stroke: {}; stroke-width: 1.5; }}",
            style.rule
        )?;
        writeln!(f, "]]></style>")?;
        writeln!(f, "</defs>")
    }

    fn write_note(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.note_lines.is_empty() {
            return Ok(());
        }
        let x = self.style.center_x();
        let top = f64::from(self.style.note_y);
        writeln!(f, "<g id=\"note\">")?;
        for (i, line) in zip(0u32.., &self.note_lines) {
            let y = self.note_line_height.mul_add(f64::from(i), top);
            writeln!(
                f,
                r#"<text class="note" x="{x}" y="{y}">{}</text>"#,
                Escaped(line)
            )?;
        }
        writeln!(f, "</g>")
    }

    fn write_grid(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.style;
        writeln!(f, "<g id=\"weekdays\">")?;
        for (column, wd) in zip(0u8.., self.week_start.weekdays()) {
            writeln!(
                f,
                r#"<text class="day-header" x="{}" y="{}">{}</text>"#,
                style.column_x(column),
                style.header_y,
                wd.initial()
            )?;
        }
        writeln!(f, "</g>")?;
        writeln!(f, "<g id=\"days\">")?;
        for cell in self.layout.day_cells() {
            writeln!(
                f,
                r#"<text class="day-number" x="{}" y="{}">{}</text>"#,
                style.column_x(cell.column),
                style.row_y(cell.row),
                cell.day
            )?;
        }
        writeln!(f, "</g>")
    }

    fn write_important_dates(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.style;
        let left = style.important_left;
        let right = left + style.important_width;
        writeln!(f, "<g id=\"important-dates\">")?;
        writeln!(
            f,
            r#"<text class="important-header" x="{left}" y="{}">{IMPORTANT_DATES_LABEL}</text>"#,
            style.header_y
        )?;
        for i in 0..style.important_lines {
            let y = style.important_first_line_y + style.important_line_gap * i;
            writeln!(
                f,
                r#"<line class="important-line" x1="{left}" y1="{y}" x2="{right}" y2="{y}"/>"#
            )?;
        }
        writeln!(f, "</g>")
    }
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.style;
        let width = style.width;
        let height = style.canvas_height(self.layout.weeks);
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        self.write_defs(f)?;
        writeln!(
            f,
            r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
            style.background
        )?;
        writeln!(
            f,
            r#"<text class="title" x="{}" y="{}">{}</text>"#,
            style.center_x(),
            style.title_y,
            self.ym.month()
        )?;
        self.write_note(f)?;
        self.write_grid(f)?;
        self.write_important_dates(f)?;
        writeln!(f, "</svg>")
    }
}

/// Displays text with the characters that are special in XML escaped
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut start = 0;
        for (i, ch) in self.0.char_indices() {
            let esc = match ch {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' => "&quot;",
                '\'' => "&#39;",
                _ => continue,
            };
            f.write_str(&self.0[start..i])?;
            f.write_str(esc)?;
            start = i + ch.len_utf8();
        }
        f.write_str(&self.0[start..])
    }
}

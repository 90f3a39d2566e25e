use std::fmt;

/// A font used by the page stylesheet, along with the families to fall back
/// on when it is not installed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FontFamily {
    pub(crate) name: &'static str,
    pub(crate) path: &'static str,
    pub(crate) fallbacks: &'static str,
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}', {}", self.name, self.fallbacks)
    }
}

pub(crate) const TITLE_FONT: FontFamily = FontFamily {
    name: "Playfair Display",
    path: "fonts/PlayfairDisplay-Regular.ttf",
    fallbacks: "Georgia, 'Times New Roman', serif",
};

pub(crate) const TEXT_FONT: FontFamily = FontFamily {
    name: "Lato",
    path: "fonts/Lato-Regular.ttf",
    fallbacks: "'Helvetica Neue', Arial, sans-serif",
};

pub(crate) const NUMBER_FONT: FontFamily = FontFamily {
    name: "Oswald",
    path: "fonts/Oswald-Regular.ttf",
    fallbacks: "'Arial Narrow', Arial, sans-serif",
};

/// Fixed measurements and colours of a calendar page.  All coordinates are in
/// pixels from the top-left corner of the canvas.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PageStyle {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Canvas height used when the month needs more than five week rows
    pub(crate) tall_height: u32,
    pub(crate) title_y: u32,
    /// Baseline of the first line of the note block
    pub(crate) note_y: u32,
    pub(crate) note_wrap_length: usize,
    /// Lines of note text beyond this are dropped so the note never runs into
    /// the weekday header
    pub(crate) max_note_lines: usize,
    pub(crate) grid_left: u32,
    pub(crate) cell_width: u32,
    pub(crate) header_y: u32,
    pub(crate) first_row_y: u32,
    pub(crate) row_height: u32,
    pub(crate) important_left: u32,
    pub(crate) important_width: u32,
    pub(crate) important_first_line_y: u32,
    pub(crate) important_line_gap: u32,
    pub(crate) important_lines: u32,
    pub(crate) background: &'static str,
    pub(crate) ink: &'static str,
    pub(crate) muted: &'static str,
    pub(crate) rule: &'static str,
    pub(crate) fonts: [FontFamily; 3],
}

impl PageStyle {
    pub(crate) const DEFAULT: PageStyle = PageStyle {
        width: 1300,
        height: 800,
        tall_height: 880,
        title_y: 90,
        note_y: 140,
        note_wrap_length: 80,
        max_note_lines: 3,
        grid_left: 60,
        cell_width: 120,
        header_y: 250,
        first_row_y: 320,
        row_height: 80,
        important_left: 960,
        important_width: 280,
        important_first_line_y: 320,
        important_line_gap: 80,
        important_lines: 5,
        background: "#ffffff",
        ink: "#1f2933",
        muted: "#616e7c",
        rule: "#9aa5b1",
        fonts: [TITLE_FONT, TEXT_FONT, NUMBER_FONT],
    };

    /// Horizontal midpoint of the canvas
    pub(crate) fn center_x(&self) -> u32 {
        self.width / 2
    }

    /// Horizontal midpoint of the grid cells in the given column
    pub(crate) fn column_x(&self, column: u8) -> u32 {
        self.grid_left + self.cell_width * u32::from(column) + self.cell_width / 2
    }

    pub(crate) fn row_y(&self, row: u8) -> u32 {
        self.first_row_y + self.row_height * u32::from(row)
    }

    pub(crate) fn canvas_height(&self, weeks: u8) -> u32 {
        if weeks > 5 {
            self.tall_height
        } else {
            self.height
        }
    }
}

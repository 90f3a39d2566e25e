mod csv;
mod month_expr;
use self::csv::{parse_records, CsvError, Record};
use self::month_expr::parse_month_expression;
use crate::calendar::YearMonth;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Notes longer than this many characters are cut short
pub(crate) const MAX_NOTE_CHARS: usize = 255;

const MONTH_COLUMN: &str = "month";
const NOTE_COLUMN: &str = "note";

/// Per-month note text, keyed by the normalized "<month name> <year>" of the
/// month it belongs to
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct NoteIndex(HashMap<String, String>);

impl NoteIndex {
    /// Reads notes from a CSV file.  Problems with the file never stop the
    /// run: a missing or unreadable file yields no notes, and bad rows are
    /// skipped.  Each problem is logged as a warning.
    pub(crate) fn load(path: &Path) -> NoteIndex {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "note file not found; continuing without notes");
                return NoteIndex::default();
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read note file; continuing without notes"
                );
                return NoteIndex::default();
            }
        };
        let (index, problems) = NoteIndex::parse(&text);
        for problem in &problems {
            warn!(path = %path.display(), "{problem}; skipping");
        }
        info!(
            path = %path.display(),
            notes = index.len(),
            skipped = problems.len(),
            "loaded notes"
        );
        index
    }

    /// Builds an index from CSV text with a header row naming `month` and
    /// `note` columns.  Rows that cannot be used are returned as errors
    /// alongside whatever could be indexed.
    pub(crate) fn parse(text: &str) -> (NoteIndex, Vec<NoteError>) {
        let mut index = NoteIndex::default();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let records = match parse_records(text) {
            Ok(records) => records,
            Err(e) => return (index, vec![NoteError::from(e)]),
        };
        let mut records = records.into_iter().filter(|r| !r.is_blank());
        let Some(header) = records.next() else {
            return (index, Vec::new());
        };
        let columns = match Columns::locate(&header) {
            Ok(columns) => columns,
            Err(e) => return (index, vec![e]),
        };
        let mut problems = Vec::new();
        for record in records {
            match columns.extract(&record) {
                Ok((ym, note)) => index.insert(ym, note),
                Err(e) => problems.push(e),
            }
        }
        (index, problems)
    }

    /// Adds a note for the given month, replacing any earlier one
    pub(crate) fn insert(&mut self, ym: YearMonth, note: &str) {
        let note = note.trim().chars().take(MAX_NOTE_CHARS).collect::<String>();
        let key = note_key(ym);
        if let Some(old) = self.0.insert(key, note) {
            debug!(month = %ym, old_note = %old, "replaced earlier note");
        }
    }

    pub(crate) fn get(&self, ym: YearMonth) -> Option<&str> {
        self.lookup(&note_key(ym))
    }

    /// Looks up a note by a key such as "March 2025", ignoring case and
    /// surplus whitespace
    pub(crate) fn lookup(&self, key: &str) -> Option<&str> {
        self.0.get(&normalize_key(key)).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub(crate) fn note_key(ym: YearMonth) -> String {
    normalize_key(&ym.to_string())
}

fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum NoteError {
    #[error("malformed CSV: {0}")]
    Csv(#[from] CsvError),
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
    #[error("line {line}: could not parse month {value:?}")]
    UnparseableMonth { line: usize, value: String },
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Positions of the columns of interest within each record
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Columns {
    month: usize,
    note: usize,
}

impl Columns {
    fn locate(header: &Record) -> Result<Columns, NoteError> {
        let find = |name: &'static str| {
            header
                .fields
                .iter()
                .position(|f| f.trim().eq_ignore_ascii_case(name))
                .ok_or(NoteError::MissingColumn(name))
        };
        Ok(Columns {
            month: find(MONTH_COLUMN)?,
            note: find(NOTE_COLUMN)?,
        })
    }

    fn extract<'a>(&self, record: &'a Record) -> Result<(YearMonth, &'a str), NoteError> {
        let (Some(month), Some(note)) =
            (record.fields.get(self.month), record.fields.get(self.note))
        else {
            return Err(NoteError::ShortRow {
                line: record.line,
                expected: self.month.max(self.note) + 1,
                found: record.fields.len(),
            });
        };
        let ym = parse_month_expression(month).ok_or_else(|| NoteError::UnparseableMonth {
            line: record.line,
            value: month.clone(),
        })?;
        Ok((ym, note.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use time::Month;

    fn year_month(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).expect("test year should be in range")
    }

    #[test]
    fn test_note_key() {
        assert_eq!(note_key(year_month(2025, Month::March)), "march 2025");
    }

    #[test]
    fn test_valid_and_invalid_rows() {
        let text = "month,note\nsometime soon,Never shown\nMarch 2025,Spring cleaning\n";
        let (index, problems) = NoteIndex::parse(text);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("march 2025"), Some("Spring cleaning"));
        assert_eq!(index.lookup("  MARCH   2025 "), Some("Spring cleaning"));
        assert_eq!(
            index.get(year_month(2025, Month::March)),
            Some("Spring cleaning")
        );
        assert_eq!(
            problems,
            [NoteError::UnparseableMonth {
                line: 2,
                value: String::from("sometime soon"),
            }]
        );
    }

    #[test]
    fn test_columns_in_any_order() {
        let text = "Note,Author,MONTH\nBook the ferry,me,2025-08\n";
        let (index, problems) = NoteIndex::parse(text);
        assert!(problems.is_empty());
        assert_eq!(
            index.get(year_month(2025, Month::August)),
            Some("Book the ferry")
        );
    }

    #[test]
    fn test_last_duplicate_wins() {
        let text = "month,note\nJan 2026,first\nJanuary 2026,second\n";
        let (index, _) = NoteIndex::parse(text);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(year_month(2026, Month::January)), Some("second"));
    }

    #[test]
    fn test_note_truncated() {
        let long = "x".repeat(300);
        let text = format!("month,note\nMay 2025,\"  {long}  \"\n");
        let (index, _) = NoteIndex::parse(&text);
        let note = index
            .get(year_month(2025, Month::May))
            .expect("note should be indexed");
        assert_eq!(note.chars().count(), MAX_NOTE_CHARS);
    }

    #[test]
    fn test_truncation_respects_characters() {
        let mut index = NoteIndex::default();
        let ym = year_month(2025, Month::May);
        index.insert(ym, &"é".repeat(400));
        assert_eq!(index.get(ym).map(|n| n.chars().count()), Some(MAX_NOTE_CHARS));
    }

    #[test]
    fn test_short_row() {
        let text = "month,note\nJune 2025\nJuly 2025,Fireworks\n";
        let (index, problems) = NoteIndex::parse(text);
        assert_eq!(index.len(), 1);
        assert_eq!(
            problems,
            [NoteError::ShortRow {
                line: 2,
                expected: 2,
                found: 1,
            }]
        );
    }

    #[test]
    fn test_missing_column() {
        let (index, problems) = NoteIndex::parse("date,text\nJune 2025,hi\n");
        assert!(index.is_empty());
        assert_eq!(problems, [NoteError::MissingColumn("month")]);
    }

    #[test]
    fn test_malformed_csv_skips_everything() {
        let (index, problems) = NoteIndex::parse("month,note\nJune 2025,ok\nJuly 2025,\"broken\n");
        assert!(index.is_empty());
        assert_eq!(
            problems,
            [NoteError::Csv(CsvError::UnterminatedQuote { line: 3 })]
        );
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(NoteIndex::parse(""), (NoteIndex::default(), Vec::new()));
        assert_eq!(
            NoteIndex::parse("\u{feff}month,note\n"),
            (NoteIndex::default(), Vec::new())
        );
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(
            file,
            "month,note\r\nApril 2025,\"Taxes due, don't forget!\"\r\nnot a month,nope\r\n"
        )
        .expect("write temp file");
        let index = NoteIndex::load(file.path());
        assert_eq!(
            index.lookup("april 2025"),
            Some("Taxes due, don't forget!")
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let index = NoteIndex::load(&dir.path().join("absent.csv"));
        assert!(index.is_empty());
    }
}

use thiserror::Error;

/// One row of a CSV file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Record {
    /// Line on which the record starts, counting from 1
    pub(super) line: usize,
    pub(super) fields: Vec<String>,
}

impl Record {
    pub(super) fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum CsvError {
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: expected a comma or end of record")]
    ExpectedEndOfRecord { line: usize },
}

/// Splits CSV text into records.  Fields may be quoted with `"`, with `""`
/// standing for a literal quote; quoted fields may span lines.  Empty lines
/// between records are skipped.
pub(super) fn parse_records(input: &str) -> Result<Vec<Record>, CsvError> {
    let mut p = CsvParser::new(input);
    let mut records = Vec::new();
    p.consume_newlines();
    while !p.eof() {
        let line = p.line;
        let mut fields = vec![p.parse_field()?];
        while p.try_consume_char(',') {
            fields.push(p.parse_field()?);
        }
        if p.try_consume_newline() {
            p.consume_newlines();
        } else if !p.eof() {
            return Err(CsvError::ExpectedEndOfRecord { line: p.line });
        }
        records.push(Record { line, fields });
    }
    Ok(records)
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct CsvParser<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> CsvParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn try_consume_char(&mut self, ch: char) -> bool {
        if self.rest().starts_with(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn consume_newlines(&mut self) {
        while self.try_consume_newline() {}
    }

    fn try_consume_newline(&mut self) -> bool {
        match self.peek_char() {
            Some('\n') => {
                self.pos += 1;
                self.line += 1;
                true
            }
            Some('\r') => {
                self.pos += 1;
                if self.peek_char() == Some('\n') {
                    self.pos += 1;
                }
                self.line += 1;
                true
            }
            _ => false,
        }
    }

    fn parse_field(&mut self) -> Result<String, CsvError> {
        match self.peek_char() {
            Some('"') => self.parse_quoted_field(),
            Some('\n' | '\r') | None => Ok(String::new()),
            _ => Ok(self.parse_unquoted_field()),
        }
    }

    fn parse_unquoted_field(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == ',' || ch == '\n' || ch == '\r' {
                break;
            }
            out.push(ch);
            self.pos += ch.len_utf8();
        }
        out
    }

    fn parse_quoted_field(&mut self) -> Result<String, CsvError> {
        let start_line = self.line;
        self.try_consume_char('"');
        let mut out = String::new();
        while let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
            match ch {
                '"' if self.try_consume_char('"') => out.push('"'),
                '"' => return Ok(out),
                '\n' => {
                    self.line += 1;
                    out.push(ch);
                }
                _ => out.push(ch),
            }
        }
        Err(CsvError::UnterminatedQuote { line: start_line })
    }
}

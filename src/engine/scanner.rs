//! Quote-aware CSV state machine
//!
//! The [`Scanner`] consumes text one character at a time and emits a
//! [`Record`] whenever a line terminator is seen outside a quoted field.
//! It keeps no reference to its input, so text can be fed in arbitrary
//! pieces (a whole string, or chunks from a stream) and the result is the
//! same.
//!
//! # States
//!
//! ```text
//!              quote                  quote
//! FieldStart ────────► InQuotedField ──────► QuoteInQuotedField
//!   │   ▲                  ▲  (other)            │ │ │
//!   │   │                  └─────── quote ───────┘ │ │
//!   │   └──────── delimiter / terminator ──────────┘ │
//!   │ other                                          │ other
//!   ▼                                                ▼
//! InUnquotedField                                AfterField
//! ```
//!
//! Quotes are only special at the start of a field. Inside a quoted field
//! two consecutive quotes stand for one literal quote; anything else,
//! delimiters and line breaks included, is kept verbatim. `\n`, `\r` and
//! `\r\n` each end one record.

use super::dialect::{Dialect, ParserConfig, UnterminatedQuote};
use super::error::{CsvError, CsvResult};
use super::record::Record;
use super::source_location::SourcePosition;

/// Scanner state between two characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanState {
    /// Nothing of the current field consumed yet
    FieldStart,
    /// Inside a field that did not start with a quote
    InUnquotedField,
    /// Inside a quoted field
    InQuotedField,
    /// Saw a quote inside a quoted field: either the closing quote or the
    /// first half of an escaped quote
    QuoteInQuotedField,
    /// Closing quote was followed by more text; the rest of the field is
    /// taken verbatim
    AfterField,
}

/// Incremental CSV scanner
#[derive(Debug, Clone)]
pub struct Scanner {
    dialect: Dialect,
    max_field_size: usize,
    state: ScanState,

    /// Field being assembled
    field: String,
    /// Completed fields of the current record
    fields: Vec<String>,

    /// Position of the next character
    position: SourcePosition,
    /// Start of the current record
    record_start: SourcePosition,
    /// Start of the current field (the opening quote, if quoted)
    field_start: SourcePosition,

    /// The last record ended on `\r`; a directly following `\n` belongs to it
    pending_lf: bool,

    /// Records emitted so far
    records_emitted: usize,
}

impl Scanner {
    /// Create a scanner, validating the dialect first
    pub fn new(dialect: Dialect, config: ParserConfig) -> CsvResult<Self> {
        dialect.validate()?;
        Ok(Self {
            dialect,
            max_field_size: config.max_field_size,
            state: ScanState::FieldStart,
            field: String::new(),
            fields: Vec::new(),
            position: SourcePosition::start(),
            record_start: SourcePosition::start(),
            field_start: SourcePosition::start(),
            pending_lf: false,
            records_emitted: 0,
        })
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Position of the next character to be consumed
    #[inline]
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// Number of records emitted so far
    #[inline]
    pub fn records_emitted(&self) -> usize {
        self.records_emitted
    }

    /// The dialect in use
    #[inline]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Count `len` bytes dropped ahead of the first character, such as a
    /// byte order mark
    ///
    /// Later offsets include them; lines and columns do not. Has no effect
    /// once a character has been consumed.
    pub fn skip_leading_bytes(&mut self, len: usize) {
        if self.position.offset == 0 {
            self.position.offset = len;
        }
    }

    /// Consume one character
    ///
    /// Returns the record completed by this character, if any.
    pub fn push_char(&mut self, ch: char) -> CsvResult<Option<Record>> {
        let at = self.position;
        self.position.advance(ch);

        if std::mem::take(&mut self.pending_lf) && ch == '\n' {
            return Ok(None);
        }

        let delimiter = self.dialect.delimiter;
        let quote = self.dialect.quote;
        let is_terminator = ch == '\n' || ch == '\r';

        match self.state {
            ScanState::FieldStart => {
                if is_terminator {
                    return Ok(self.end_line(ch, at));
                }
                if self.fields.is_empty() {
                    self.record_start = at;
                }
                self.field_start = at;
                if ch == quote {
                    self.state = ScanState::InQuotedField;
                } else if ch == delimiter {
                    self.end_field();
                } else {
                    self.accumulate(ch)?;
                    self.state = ScanState::InUnquotedField;
                }
            }
            ScanState::InUnquotedField | ScanState::AfterField => {
                if ch == delimiter {
                    self.end_field();
                } else if is_terminator {
                    return Ok(Some(self.end_record(ch)));
                } else {
                    self.accumulate(ch)?;
                }
            }
            ScanState::InQuotedField => {
                if ch == quote {
                    self.state = ScanState::QuoteInQuotedField;
                } else {
                    self.accumulate(ch)?;
                }
            }
            ScanState::QuoteInQuotedField => {
                if ch == quote {
                    self.accumulate(quote)?;
                    self.state = ScanState::InQuotedField;
                } else if ch == delimiter {
                    self.end_field();
                } else if is_terminator {
                    return Ok(Some(self.end_record(ch)));
                } else {
                    self.accumulate(ch)?;
                    self.state = ScanState::AfterField;
                }
            }
        }

        Ok(None)
    }

    /// Consume `text[*cursor..]` until a record completes or the text runs out
    ///
    /// `cursor` is advanced past everything consumed and must sit on a char
    /// boundary. Runs of ordinary characters inside a field are copied in
    /// bulk when the dialect is ASCII.
    pub fn next_record(&mut self, text: &str, cursor: &mut usize) -> CsvResult<Option<Record>> {
        let bytes = text.as_bytes();
        let ascii = self.dialect.is_ascii();

        while *cursor < bytes.len() {
            if ascii {
                let rest = &bytes[*cursor..];
                let run = match self.state {
                    ScanState::InQuotedField => {
                        memchr::memchr(self.dialect.quote as u8, rest).unwrap_or(rest.len())
                    }
                    ScanState::InUnquotedField | ScanState::AfterField => {
                        memchr::memchr3(self.dialect.delimiter as u8, b'\n', b'\r', rest)
                            .unwrap_or(rest.len())
                    }
                    _ => 0,
                };
                if run > 0 {
                    // `run` stops on an ASCII byte or the end, both char boundaries
                    let piece = &text[*cursor..*cursor + run];
                    self.accumulate_str(piece)?;
                    self.position.advance_str(piece);
                    *cursor += run;
                    continue;
                }
            }

            let Some(ch) = text[*cursor..].chars().next() else {
                break;
            };
            *cursor += ch.len_utf8();
            if let Some(record) = self.push_char(ch)? {
                return Ok(Some(record));
            }
        }

        Ok(None)
    }

    /// Consume all of `text`, appending completed records to `out`
    pub fn push_str(&mut self, text: &str, out: &mut Vec<Record>) -> CsvResult<()> {
        let mut cursor = 0;
        while let Some(record) = self.next_record(text, &mut cursor)? {
            out.push(record);
        }
        Ok(())
    }

    /// Signal end of input
    ///
    /// Returns the final record if the input did not end with a terminator.
    /// An open quoted field is an error under [`UnterminatedQuote::Error`]
    /// and is closed as-is under [`UnterminatedQuote::Close`]. The scanner
    /// is ready for new input afterwards.
    pub fn finish(&mut self) -> CsvResult<Option<Record>> {
        self.pending_lf = false;

        let record = match self.state {
            ScanState::FieldStart => {
                if self.fields.is_empty() {
                    None
                } else {
                    // A trailing delimiter opens one last, empty field
                    self.end_field();
                    Some(self.take_record())
                }
            }
            ScanState::InUnquotedField | ScanState::AfterField | ScanState::QuoteInQuotedField => {
                self.end_field();
                Some(self.take_record())
            }
            ScanState::InQuotedField => match self.dialect.unterminated_quote {
                UnterminatedQuote::Error => {
                    let position = self.field_start;
                    self.field.clear();
                    self.fields.clear();
                    self.state = ScanState::FieldStart;
                    return Err(CsvError::malformed("Unterminated quoted field", position));
                }
                UnterminatedQuote::Close => {
                    log_debug!("closing unterminated quoted field opened at {}", self.field_start);
                    self.end_field();
                    Some(self.take_record())
                }
            },
        };

        log_debug!(
            "scan finished: {} records, {} bytes",
            self.records_emitted,
            self.position.offset
        );
        Ok(record)
    }

    /// Reset to the initial state, forgetting any partial record
    pub fn reset(&mut self) {
        self.state = ScanState::FieldStart;
        self.field.clear();
        self.fields.clear();
        self.position = SourcePosition::start();
        self.record_start = SourcePosition::start();
        self.field_start = SourcePosition::start();
        self.pending_lf = false;
        self.records_emitted = 0;
    }

    /// Terminator seen at `FieldStart`
    fn end_line(&mut self, ch: char, at: SourcePosition) -> Option<Record> {
        self.pending_lf = ch == '\r';
        if self.fields.is_empty() {
            if self.dialect.skip_blank_lines {
                return None;
            }
            self.record_start = at;
        }
        self.end_field();
        Some(self.take_record())
    }

    fn end_record(&mut self, ch: char) -> Record {
        self.pending_lf = ch == '\r';
        self.end_field();
        self.take_record()
    }

    #[inline]
    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
        self.state = ScanState::FieldStart;
    }

    fn take_record(&mut self) -> Record {
        self.state = ScanState::FieldStart;
        self.records_emitted += 1;
        Record::at(std::mem::take(&mut self.fields), self.record_start)
    }

    #[inline]
    fn accumulate(&mut self, ch: char) -> CsvResult<()> {
        self.check_field_size(ch.len_utf8())?;
        self.field.push(ch);
        Ok(())
    }

    #[inline]
    fn accumulate_str(&mut self, text: &str) -> CsvResult<()> {
        self.check_field_size(text.len())?;
        self.field.push_str(text);
        Ok(())
    }

    #[inline]
    fn check_field_size(&self, extra: usize) -> CsvResult<()> {
        let size = self.field.len() + extra;
        if self.max_field_size > 0 && size > self.max_field_size {
            return Err(CsvError::FieldTooLarge {
                position: self.field_start,
                size,
                max_size: self.max_field_size,
            });
        }
        Ok(())
    }
}

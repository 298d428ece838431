//! CSV parser entry point
//!
//! [`CsvParser`] pairs a [`Dialect`] with [`ParserConfig`] limits and runs
//! the [`Scanner`] over in-memory text, either eagerly
//! ([`parse`](CsvParser::parse)) or one record at a time
//! ([`records`](CsvParser::records)). The parser holds no state between
//! calls: the same input always gives the same result, and one parser can
//! be shared across threads.
//!
//! # Example
//!
//! ```rust
//! use csvsplit::{CsvParser, Dialect};
//!
//! let parser = CsvParser::new(Dialect::semicolon());
//! let result = parser.parse("name;note\n\"Smith; J\";\"said \"\"hi\"\"\"\n").unwrap();
//! assert_eq!(result[1], vec!["Smith; J", "said \"hi\""]);
//! ```

use super::dialect::{Dialect, ParserConfig};
use super::error::{CsvError, CsvResult};
use super::record::{ParseResult, Record};
use super::scanner::Scanner;
use std::iter::FusedIterator;

/// Split `text` into records with the given delimiter and quote character
///
/// Shorthand for `CsvParser::new(Dialect::default().with_delimiter(..).with_quote(..))`.
pub fn parse(text: &str, delimiter: char, quote: char) -> CsvResult<ParseResult> {
    CsvParser::new(
        Dialect::default()
            .with_delimiter(delimiter)
            .with_quote(quote),
    )
    .parse(text)
}

/// Structural CSV parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvParser {
    dialect: Dialect,
    config: ParserConfig,
}

impl CsvParser {
    /// Create a parser for a dialect with default limits
    #[inline]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            config: ParserConfig::default(),
        }
    }

    /// Replace the resource limits
    #[inline]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// The dialect in use
    #[inline]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// The limits in use
    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// A fresh scanner for this parser's dialect and limits
    pub fn scanner(&self) -> CsvResult<Scanner> {
        Scanner::new(self.dialect, self.config)
    }

    /// Parse all of `text`
    ///
    /// The dialect is validated before any scanning begins. Empty input
    /// yields an empty result.
    pub fn parse(&self, text: &str) -> CsvResult<ParseResult> {
        let mut scanner = self.scanner()?;
        self.config.check_input_size(text.len())?;

        log_debug!(
            "parsing {} bytes (delimiter {:?}, quote {:?})",
            text.len(),
            self.dialect.delimiter,
            self.dialect.quote
        );

        let mut records = Vec::new();
        scanner.push_str(text, &mut records)?;
        records.extend(scanner.finish()?);
        Ok(ParseResult::new(records))
    }

    /// Iterate over the records of `text` lazily
    ///
    /// Configuration errors are reported by the first call to `next`. After
    /// an error the iterator is exhausted.
    pub fn records<'t>(&self, text: &'t str) -> Records<'t> {
        let start = self
            .scanner()
            .and_then(|scanner| self.config.check_input_size(text.len()).map(|_| scanner));

        match start {
            Ok(scanner) => Records {
                text,
                cursor: 0,
                scanner: Some(scanner),
                error: None,
            },
            Err(err) => Records {
                text,
                cursor: 0,
                scanner: None,
                error: Some(err),
            },
        }
    }
}

/// Lazy record iterator returned by [`CsvParser::records`]
#[derive(Debug)]
pub struct Records<'t> {
    text: &'t str,
    cursor: usize,
    scanner: Option<Scanner>,
    error: Option<CsvError>,
}

impl<'t> Records<'t> {
    /// Byte offset of the next unread character
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Records<'_> {
    type Item = CsvResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.error.take() {
            return Some(Err(err));
        }

        let scanner = self.scanner.as_mut()?;
        let outcome = match scanner.next_record(self.text, &mut self.cursor) {
            Ok(Some(record)) => return Some(Ok(record)),
            Ok(None) => scanner.finish().transpose(),
            Err(err) => Some(Err(err)),
        };
        self.scanner = None;
        outcome
    }
}

impl FusedIterator for Records<'_> {}

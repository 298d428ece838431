//! Dialect and limit configuration
//!
//! A [`Dialect`] describes one CSV flavour (delimiter, quote character and
//! how edge cases are treated). A [`ParserConfig`] bundles resource limits.
//! Both follow the same builder style and both have sensible defaults.
//!
//! Dialects can be loaded from JSON; omitted keys take their defaults:
//!
//! ```rust
//! use csvsplit::Dialect;
//!
//! let dialect: Dialect = serde_json::from_str(r#"{ "delimiter": ";" }"#).unwrap();
//! assert_eq!(dialect.delimiter, ';');
//! assert_eq!(dialect.quote, '"');
//! ```

use super::error::{CsvError, CsvResult};
use serde::{Deserialize, Serialize};

/// Default maximum input size: 100 MB
pub const DEFAULT_MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

/// Default maximum field size (0 = no limit)
pub const DEFAULT_MAX_FIELD_SIZE: usize = 0;

/// What to do when input ends inside a quoted field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnterminatedQuote {
    /// Fail with [`CsvError::MalformedInput`]
    #[default]
    Error,
    /// Close the field silently, keeping everything after the opening quote
    Close,
}

/// One CSV flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Field separator
    pub delimiter: char,
    /// Quote character; only special at the start of a field
    pub quote: char,
    /// Policy for a quoted field still open at end of input
    pub unterminated_quote: UnterminatedQuote,
    /// Drop empty lines instead of producing a record with one empty field
    pub skip_blank_lines: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            unterminated_quote: UnterminatedQuote::Error,
            skip_blank_lines: true,
        }
    }
}

impl Dialect {
    /// Comma separated, double-quoted (RFC 4180 style)
    pub fn csv() -> Self {
        Self::default()
    }

    /// Tab separated
    pub fn tsv() -> Self {
        Self::default().with_delimiter('\t')
    }

    /// Semicolon separated, as written by Excel in locales that use a decimal comma
    pub fn semicolon() -> Self {
        Self::default().with_delimiter(';')
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Set the unterminated quote policy
    pub fn with_unterminated_quote(mut self, policy: UnterminatedQuote) -> Self {
        self.unterminated_quote = policy;
        self
    }

    /// Set whether blank lines are skipped
    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    /// Check that the dialect is usable
    ///
    /// Delimiter and quote must differ, and neither may be a line terminator.
    pub fn validate(&self) -> CsvResult<()> {
        if self.delimiter == self.quote {
            return Err(CsvError::invalid_configuration(format!(
                "delimiter and quote are both {:?}",
                self.delimiter
            )));
        }
        for (name, ch) in [("delimiter", self.delimiter), ("quote", self.quote)] {
            if ch == '\n' || ch == '\r' {
                return Err(CsvError::invalid_configuration(format!(
                    "{} cannot be a line terminator ({:?})",
                    name, ch
                )));
            }
        }
        Ok(())
    }

    /// Whether both special characters are single bytes
    ///
    /// The scanner only takes its `memchr` fast paths for ASCII dialects.
    #[inline]
    pub fn is_ascii(&self) -> bool {
        self.delimiter.is_ascii() && self.quote.is_ascii()
    }
}

/// Resource limits for a parse
///
/// # Example
///
/// ```rust
/// use csvsplit::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_max_input_size(10 * 1024 * 1024) // 10 MB
///     .with_max_field_size(64 * 1024);
/// assert_eq!(config.max_field_size, 64 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum allowed input size in bytes
    pub max_input_size: usize,

    /// Maximum size of a single field in bytes (0 = no limit)
    pub max_field_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_field_size: DEFAULT_MAX_FIELD_SIZE,
        }
    }
}

impl ParserConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum input size
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    /// Set the maximum field size
    pub fn with_max_field_size(mut self, size: usize) -> Self {
        self.max_field_size = size;
        self
    }

    /// Reject inputs larger than `max_input_size`
    pub fn check_input_size(&self, input_size: usize) -> CsvResult<()> {
        if input_size > self.max_input_size {
            return Err(CsvError::InputTooLarge {
                input_size,
                max_size: self.max_input_size,
            });
        }
        Ok(())
    }
}

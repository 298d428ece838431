//! Error Reporting for csvsplit
//!
//! All fallible operations return [`CsvError`]. Errors that point into the
//! input carry a [`SourcePosition`] and can be rendered with the offending
//! line and a caret:
//!
//! ```text
//! Error at line 2, column 3:
//! x,"never closed
//!   ^
//! `- Unterminated quoted field
//! ```

use super::source_location::{get_line_at_offset, SourcePosition};
use std::fmt;

/// Result alias used throughout the crate
pub type CsvResult<T> = Result<T, CsvError>;

/// Error type for all csvsplit operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    /// The dialect cannot be used for scanning
    InvalidConfiguration {
        /// Why the configuration was rejected
        reason: String,
    },

    /// Structurally broken input (an unterminated quoted field)
    MalformedInput {
        /// What went wrong
        message: String,
        /// Where the problem starts
        position: SourcePosition,
    },

    /// Input exceeds maximum allowed size
    InputTooLarge {
        /// Size of the input in bytes
        input_size: usize,
        /// Maximum allowed size
        max_size: usize,
    },

    /// A single field exceeds the configured limit
    FieldTooLarge {
        /// Start of the field
        position: SourcePosition,
        /// Bytes accumulated when the limit was hit
        size: usize,
        /// Maximum allowed size
        max_size: usize,
    },

    /// Streamed bytes are not valid UTF-8
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence
        offset: usize,
    },

    /// Reading the input failed
    Io(String),

    /// A record does not match the header width of a strict table
    FieldCountMismatch {
        /// Index of the record (0 is the header)
        record: usize,
        /// Number of header columns
        expected: usize,
        /// Number of fields found
        actual: usize,
    },
}

impl CsvError {
    /// Shorthand for an [`InvalidConfiguration`](CsvError::InvalidConfiguration) error
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        CsvError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`MalformedInput`](CsvError::MalformedInput) error
    pub fn malformed(message: impl Into<String>, position: SourcePosition) -> Self {
        CsvError::MalformedInput {
            message: message.into(),
            position,
        }
    }

    /// Position in the input this error refers to, if any
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            CsvError::MalformedInput { position, .. } | CsvError::FieldTooLarge { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }

    /// Format the error with the offending source line and a caret
    ///
    /// Errors without a position fall back to their `Display` form.
    pub fn format_with_source(&self, source: &str) -> String {
        let Some(pos) = self.position() else {
            return self.to_string();
        };

        let mut output = format!("Error at line {}, column {}:\n", pos.line, pos.column);
        output.push_str(get_line_at_offset(source, pos.offset));
        output.push('\n');
        for _ in 0..pos.column.saturating_sub(1) {
            output.push(' ');
        }
        output.push_str("^\n`- ");
        output.push_str(&self.summary());
        output.push('\n');
        output
    }

    fn summary(&self) -> String {
        match self {
            CsvError::MalformedInput { message, .. } => message.clone(),
            CsvError::FieldTooLarge { size, max_size, .. } => {
                format!("Field of {} bytes exceeds limit of {} bytes", size, max_size)
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvError::InvalidConfiguration { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            CsvError::MalformedInput { message, position } => {
                write!(f, "Malformed input at {}: {}", position, message)
            }
            CsvError::InputTooLarge {
                input_size,
                max_size,
            } => write!(
                f,
                "Input too large: {} bytes exceeds limit of {} bytes",
                input_size, max_size
            ),
            CsvError::FieldTooLarge {
                position,
                size,
                max_size,
            } => write!(
                f,
                "Field too large at {}: {} bytes exceeds limit of {} bytes",
                position, size, max_size
            ),
            CsvError::InvalidUtf8 { offset } => {
                write!(f, "Invalid UTF-8 at byte offset {}", offset)
            }
            CsvError::Io(msg) => write!(f, "I/O error: {}", msg),
            CsvError::FieldCountMismatch {
                record,
                expected,
                actual,
            } => write!(
                f,
                "Record {} has {} fields, expected {}",
                record, actual, expected
            ),
        }
    }
}

impl std::error::Error for CsvError {}

impl From<std::io::Error> for CsvError {
    fn from(err: std::io::Error) -> Self {
        CsvError::Io(err.to_string())
    }
}

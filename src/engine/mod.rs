//! Core splitting engine
//!
//! # Module Organization
//!
//! ## Core Types
//! - [`CsvParser`] - Parser entry point (eager and lazy)
//! - [`Scanner`] - Incremental per-character state machine
//! - [`Record`], [`ParseResult`] - Output data model
//!
//! ## Configuration
//! - [`dialect`] - Delimiter, quote and edge-case policies; resource limits
//!
//! ## Error Handling
//! - [`error`] - [`CsvError`] and source-context formatting
//! - [`source_location`] - Line/column tracking
//!
//! ## Large and Many Inputs
//! - [`streaming`] - Chunked parsing from readers
//! - [`parallel`] - Batch parsing of independent inputs
//!
//! ## Transforms
//! - [`transform`] - Header-keyed tables and JSON output

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod dialect;
pub mod error;
pub mod parallel;
pub mod parser;
pub mod record;
pub mod scanner;
pub mod source_location;
pub mod streaming;
pub mod transform;

// ============================================================================
// Core Types
// ============================================================================

pub use parser::{parse, CsvParser, Records};
pub use record::{ParseResult, Record};
pub use scanner::{ScanState, Scanner};

// ============================================================================
// Configuration
// ============================================================================

pub use dialect::{Dialect, ParserConfig, UnterminatedQuote};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{CsvError, CsvResult};
pub use source_location::{get_line_at_offset, SourcePosition};

// ============================================================================
// Streaming and Parallel Parsing
// ============================================================================

pub use parallel::{parse_batch_parallel, parse_batch_parallel_owned};
pub use streaming::{ChunkConfig, StreamingParser, StreamingResult};

// ============================================================================
// Transforms
// ============================================================================

pub use transform::{HeaderMode, Table};

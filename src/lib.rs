//! csvsplit - Structural CSV Splitter
//!
//! Turns raw CSV text into records of string fields with an explicit,
//! quote-aware state machine. It provides:
//! - Configurable delimiter and quote characters (`Dialect`)
//! - Embedded delimiters, line breaks and doubled quotes inside quoted fields
//! - `\n`, `\r` and `\r\n` line terminators
//! - Eager and lazy (iterator) parsing
//! - Streaming from readers with chunk boundaries anywhere
//! - Batch parsing across threads (`parallel` feature)
//! - Header-keyed tables and JSON output
//!
//! Field content is never interpreted. Values mangled by spreadsheet
//! exporters, such as a long number truncated to `12345678901234…`, come
//! back exactly as written.
//!
//! ## Quick Start
//!
//! ```rust
//! let result = csvsplit::parse("a,b,c\n\"a\"\"b\",\"x,y\"\n", ',', '"').unwrap();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0], vec!["a", "b", "c"]);
//! assert_eq!(result[1], vec!["a\"b", "x,y"]);
//! ```
//!
//! ## Choosing a Dialect
//!
//! ```rust
//! use csvsplit::{CsvParser, Dialect, UnterminatedQuote};
//!
//! let parser = CsvParser::new(
//!     Dialect::tsv().with_unterminated_quote(UnterminatedQuote::Close),
//! );
//! let result = parser.parse("a\t\"unfinished").unwrap();
//! assert_eq!(result[0], vec!["a", "unfinished"]);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Parse batches of inputs with rayon
//! - `logging` - Enable debug logging using the `log` crate

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]

// Prelude module for convenient imports
pub mod prelude;

pub mod engine;

/// Re-export commonly used types for convenience
pub use engine::{
    // Parsing
    parse, CsvParser, ParseResult, Record, Records, ScanState, Scanner,
    // Configuration
    Dialect, ParserConfig, UnterminatedQuote,
    // Errors
    CsvError, CsvResult, SourcePosition,
    // Streaming and batch parsing
    parse_batch_parallel, parse_batch_parallel_owned, ChunkConfig, StreamingParser,
    StreamingResult,
    // Transform
    HeaderMode, Table,
};

//! Prelude module for convenient imports
//!
//! ```
//! use csvsplit::prelude::*;
//!
//! let result = CsvParser::new(Dialect::default()).parse("a,b\n").unwrap();
//! assert_eq!(result[0], vec!["a", "b"]);
//! ```
//!
//! # Re-exported Items
//!
//! ## Core Types
//! - [`CsvParser`] - Parser entry point
//! - [`Record`] - One row of fields
//! - [`ParseResult`] - All records of an input
//!
//! ## Configuration
//! - [`Dialect`] - Delimiter, quote and edge-case policies
//! - [`UnterminatedQuote`] - Policy for a quote left open at end of input
//! - [`ParserConfig`] - Resource limits
//!
//! ## Error Handling
//! - [`CsvError`] - Error type
//! - [`CsvResult`] - Result alias
//!
//! ## Streaming and Tables
//! - [`StreamingParser`], [`ChunkConfig`] - Chunked input
//! - [`Table`], [`HeaderMode`] - Header-keyed access

pub use crate::engine::{
    ChunkConfig, CsvError, CsvParser, CsvResult, Dialect, HeaderMode, ParseResult, ParserConfig,
    Record, StreamingParser, Table, UnterminatedQuote,
};

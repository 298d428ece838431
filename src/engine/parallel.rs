//! Parallel parsing support
//!
//! Independent inputs (one per exported sheet, say) share nothing, so they
//! can be split on separate threads with no coordination.
//!
//! # Feature Flag
//!
//! Work is spread with rayon only when the `parallel` feature is enabled;
//! otherwise the same functions run sequentially:
//!
//! ```toml
//! [dependencies]
//! csvsplit = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use csvsplit::{parse_batch_parallel, CsvParser};
//!
//! let parser = CsvParser::default();
//! let results = parse_batch_parallel(&parser, &["a,b\n", "\"open"]);
//!
//! // Results are in same order as inputs
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! ```

use super::error::CsvResult;
use super::parser::CsvParser;
use super::record::ParseResult;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parse multiple inputs in parallel
///
/// Returns one result per input, in input order. A failure in one input
/// does not affect the others.
#[cfg(feature = "rayon")]
pub fn parse_batch_parallel(parser: &CsvParser, inputs: &[&str]) -> Vec<CsvResult<ParseResult>> {
    inputs.par_iter().map(|input| parser.parse(input)).collect()
}

/// Parse multiple inputs sequentially (fallback when rayon is not available)
#[cfg(not(feature = "rayon"))]
pub fn parse_batch_parallel(parser: &CsvParser, inputs: &[&str]) -> Vec<CsvResult<ParseResult>> {
    inputs.iter().map(|input| parser.parse(input)).collect()
}

/// Parse multiple owned inputs in parallel
#[cfg(feature = "rayon")]
pub fn parse_batch_parallel_owned(
    parser: &CsvParser,
    inputs: Vec<String>,
) -> Vec<CsvResult<ParseResult>> {
    inputs
        .into_par_iter()
        .map(|input| parser.parse(&input))
        .collect()
}

/// Parse multiple owned inputs sequentially (fallback)
#[cfg(not(feature = "rayon"))]
pub fn parse_batch_parallel_owned(
    parser: &CsvParser,
    inputs: Vec<String>,
) -> Vec<CsvResult<ParseResult>> {
    inputs
        .into_iter()
        .map(|input| parser.parse(&input))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::CsvError;

    #[test]
    fn test_parse_batch_preserves_order() {
        let parser = CsvParser::default();
        let inputs = vec!["1\n", "2\n2\n", "3\n3\n3\n"];
        let results = parse_batch_parallel(&parser, &inputs);

        let lens: Vec<usize> = results.into_iter().map(|r| r.unwrap().len()).collect();
        assert_eq!(lens, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_batch_with_failures() {
        let parser = CsvParser::default();
        let results = parse_batch_parallel(&parser, &["ok\n", "\"broken", "ok\n"]);

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(CsvError::MalformedInput { .. })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_parse_batch_owned() {
        let parser = CsvParser::default();
        let inputs = vec!["a,b\n".to_string(), "c\n".to_string()];
        let results = parse_batch_parallel_owned(&parser, inputs);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap()[0], vec!["a", "b"]);
    }

    #[test]
    fn test_parse_batch_empty() {
        let results = parse_batch_parallel(&CsvParser::default(), &[]);
        assert!(results.is_empty());
    }
}

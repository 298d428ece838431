//! Property-based tests using proptest
//!
//! These tests verify parser behavior across a wide range of generated
//! inputs: quoting, chunked streaming and lazy iteration must never change
//! what comes out.

use csvsplit::{parse, ChunkConfig, CsvParser, Dialect, StreamingParser};
use proptest::prelude::*;
use std::io::Cursor;

/// Quote a field the way a spreadsheet exporter would
fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Field content drawn from characters that matter to the scanner
fn field_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['a', 'Z', '1', ' ', ',', '"', '\n', '\r', '…', 'é', '.']),
        0..12,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Arbitrary CSV-ish text, well-formed or not
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['a', 'b', ',', '"', '\n', '\r', '…', ' ']),
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    /// Quoted fields come back exactly as written
    #[test]
    fn test_quoted_fields_survive(rows in prop::collection::vec(
        prop::collection::vec(field_strategy(), 1..5),
        1..5,
    )) {
        let text: String = rows
            .iter()
            .map(|row| row.iter().map(|f| quote_field(f)).collect::<Vec<_>>().join(",") + "\r\n")
            .collect();

        let result = parse(&text, ',', '"').unwrap();
        prop_assert_eq!(result.to_vecs(), rows);
    }

    /// Plain fields without special characters split like `str::split`
    #[test]
    fn test_plain_fields_split_on_delimiter(line in "[a-z0-9 .…]{1,20}(,[a-z0-9 .…]{0,20}){0,6}") {
        let result = parse(&format!("{}\n", line), ',', '"').unwrap();
        let expected: Vec<&str> = line.split(',').collect();
        prop_assert_eq!(result.len(), 1);
        prop_assert_eq!(result[0].fields(), &expected.iter().map(|s| s.to_string()).collect::<Vec<_>>()[..]);
    }

    /// Parsing is a pure function of the input
    #[test]
    fn test_reparse_is_idempotent(text in text_strategy()) {
        let parser = CsvParser::default();
        let first = parser.parse(&text);
        let second = parser.parse(&text);
        prop_assert_eq!(first, second);
    }

    /// Any chunking of the input yields the same records as parsing it whole
    #[test]
    fn test_streaming_equals_eager(text in text_strategy(), chunk_size in 1usize..9) {
        let eager = CsvParser::default().parse(&text);

        let mut parser = StreamingParser::new(Dialect::default(), ChunkConfig::new(chunk_size));
        let mut cursor = Cursor::new(text.as_bytes());
        let streamed = parser.parse_from_reader(&mut cursor).map(|r| r.records);

        prop_assert_eq!(eager, streamed);
    }

    /// The lazy iterator yields exactly the eager records
    #[test]
    fn test_lazy_equals_eager(text in text_strategy()) {
        let parser = CsvParser::default();
        let eager = parser.parse(&text);
        let lazy: Result<csvsplit::ParseResult, _> = parser.records(&text).collect();
        prop_assert_eq!(eager, lazy);
    }

    /// Content never invents records: at most one per terminator plus one
    #[test]
    fn test_record_count_bounded(text in text_strategy()) {
        if let Ok(result) = parse(&text, ',', '"') {
            let terminators = text.matches(['\n', '\r']).count();
            prop_assert!(result.len() <= terminators + 1);
        }
    }
}

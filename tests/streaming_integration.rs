//! Integration tests for streaming parsing
//!
//! These tests cover the streaming parser functionality including:
//! - Chunk configuration
//! - Parsing from readers, chunk iterators and files
//! - Chunk boundaries inside characters, quotes and CRLF pairs
//! - Error handling

use csvsplit::{
    ChunkConfig, CsvError, CsvParser, Dialect, ParserConfig, SourcePosition, StreamingParser,
    UnterminatedQuote,
};
use std::io::{Cursor, Read, Write};

fn stream_with_chunk_size(input: &str, chunk_size: usize) -> csvsplit::StreamingResult {
    let mut parser = StreamingParser::new(Dialect::default(), ChunkConfig::new(chunk_size));
    let mut cursor = Cursor::new(input.as_bytes());
    parser.parse_from_reader(&mut cursor).expect("Should parse")
}

// ============================================================================
// ChunkConfig Tests
// ============================================================================

#[test]
fn test_chunk_config_default() {
    let config = ChunkConfig::default();
    assert_eq!(config.chunk_size, 64 * 1024);
}

#[test]
fn test_chunk_config_custom() {
    let config = ChunkConfig::new(1024);
    assert_eq!(config.chunk_size, 1024);
}

// ============================================================================
// StreamingParser Tests
// ============================================================================

#[test]
fn test_streaming_parser_new() {
    let parser = StreamingParser::with_defaults(Dialect::default());
    assert_eq!(parser.total_bytes_read(), 0);
    assert!(!parser.is_eof());
}

#[test]
fn test_streaming_parse_simple() {
    let result = stream_with_chunk_size("a,b,c\n", 64);
    assert_eq!(result.records, vec![vec!["a", "b", "c"]]);
    assert_eq!(result.chunks_processed, 1);
    assert_eq!(result.bytes_processed, 6);
}

#[test]
fn test_streaming_parse_empty() {
    let result = stream_with_chunk_size("", 64);
    assert!(result.records.is_empty());
    assert_eq!(result.chunks_processed, 0);
}

#[test]
fn test_streaming_matches_eager_for_every_chunk_size() {
    let input = "id,desc\r\n1,\"multi\r\nline, with \"\"quotes\"\"\"\r\n2,12345678901234…\r\n3,";
    let expected = CsvParser::default().parse(input).unwrap();

    for chunk_size in 1..=input.len() {
        let result = stream_with_chunk_size(input, chunk_size);
        assert_eq!(result.records, expected, "chunk size {}", chunk_size);
    }
}

#[test]
fn test_streaming_from_chunk_iterator() {
    let chunks = vec![
        "name,no".as_bytes().to_vec(),
        "te\n\"Wid".as_bytes().to_vec(),
        "get\",\"2\"\" pipe".as_bytes().to_vec(),
        "\"\n".as_bytes().to_vec(),
    ];
    let mut parser = StreamingParser::with_defaults(Dialect::default());
    let result = parser.parse_from_chunks(chunks).unwrap();

    assert_eq!(
        result.records,
        vec![vec!["name", "note"], vec!["Widget", "2\" pipe"]]
    );
    assert_eq!(result.chunks_processed, 4);
}

#[test]
fn test_streaming_strips_leading_bom() {
    let result = stream_with_chunk_size("\u{FEFF}h1,h2\nv1,v2\n", 2);
    assert_eq!(result.records[0], vec!["h1", "h2"]);
}

#[test]
fn test_bom_kept_by_eager_parse_dropped_by_streaming() {
    let input = "\u{FEFF}id,name\n1,a\n";
    let eager = CsvParser::default().parse(input).unwrap();
    assert_eq!(eager[0], vec!["\u{FEFF}id", "name"]);

    let streamed = stream_with_chunk_size(input, 4).records;
    assert_eq!(streamed[0], vec!["id", "name"]);
    assert_eq!(streamed[1], eager[1]);
}

#[test]
fn test_error_position_after_bom_points_into_raw_input() {
    let input = "\u{FEFF}ab\n\"x";

    for chunk_size in 1..=input.len() {
        let mut parser = StreamingParser::new(Dialect::default(), ChunkConfig::new(chunk_size));
        let err = parser
            .parse_from_reader(&mut Cursor::new(input.as_bytes()))
            .unwrap_err();
        assert_eq!(
            err.position(),
            Some(SourcePosition::new(6, 2, 1)),
            "chunk size {}",
            chunk_size
        );
        assert!(err
            .format_with_source(input)
            .starts_with("Error at line 2, column 1:\n\"x\n^\n"));
    }
}

#[test]
fn test_record_positions_after_bom() {
    let result = stream_with_chunk_size("\u{FEFF}a\nb\n", 2);
    let offsets: Vec<usize> = result.records.iter().map(|r| r.position().offset).collect();
    assert_eq!(offsets, vec![3, 5]);
}

#[test]
fn test_streaming_invalid_utf8() {
    let mut parser = StreamingParser::with_defaults(Dialect::default());
    let bytes: Vec<u8> = vec![b'a', b',', 0xC3, 0x28, b'\n'];
    let err = parser.parse_from_chunks(vec![bytes]).unwrap_err();
    assert_eq!(err, CsvError::InvalidUtf8 { offset: 2 });
}

#[test]
fn test_streaming_truncated_character_at_end() {
    let mut parser = StreamingParser::with_defaults(Dialect::default());
    let mut bytes = b"x,".to_vec();
    bytes.extend_from_slice(&"…".as_bytes()[..2]);
    let err = parser.parse_from_chunks(vec![bytes]).unwrap_err();
    assert_eq!(err, CsvError::InvalidUtf8 { offset: 2 });
}

#[test]
fn test_streaming_unterminated_quote() {
    let mut parser = StreamingParser::new(Dialect::default(), ChunkConfig::new(3));
    let mut cursor = Cursor::new("a\n\"open".as_bytes());
    let err = parser.parse_from_reader(&mut cursor).unwrap_err();
    assert!(matches!(err, CsvError::MalformedInput { .. }));

    let mut lenient = StreamingParser::new(
        Dialect::default().with_unterminated_quote(UnterminatedQuote::Close),
        ChunkConfig::new(3),
    );
    let mut cursor = Cursor::new("a\n\"open".as_bytes());
    let result = lenient.parse_from_reader(&mut cursor).unwrap();
    assert_eq!(result.records, vec![vec!["a"], vec!["open"]]);
}

#[test]
fn test_streaming_invalid_dialect() {
    let mut parser = StreamingParser::with_defaults(Dialect::default().with_quote(','));
    let mut cursor = Cursor::new("a\n".as_bytes());
    let err = parser.parse_from_reader(&mut cursor).unwrap_err();
    assert!(matches!(err, CsvError::InvalidConfiguration { .. }));
}

#[test]
fn test_streaming_input_limit() {
    let mut parser = StreamingParser::new(Dialect::default(), ChunkConfig::new(4))
        .with_parser_config(ParserConfig::new().with_max_input_size(6));
    let mut cursor = Cursor::new("1,2\n3,4\n".as_bytes());
    let err = parser.parse_from_reader(&mut cursor).unwrap_err();
    assert_eq!(
        err,
        CsvError::InputTooLarge {
            input_size: 8,
            max_size: 6
        }
    );
}

#[test]
fn test_for_each_record_delivers_incrementally() {
    let mut parser = StreamingParser::new(Dialect::default(), ChunkConfig::new(4));
    let mut cursor = Cursor::new("a\nb\nc\n".as_bytes());
    let mut seen = Vec::new();

    let count = parser
        .for_each_record(&mut cursor, |record| {
            seen.push(record.into_fields().join("|"));
            Ok(())
        })
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(seen, vec!["a", "b", "c"]);
}

#[test]
fn test_for_each_record_stops_on_callback_error() {
    let mut parser = StreamingParser::with_defaults(Dialect::default());
    let mut cursor = Cursor::new("a\nb\nc\n".as_bytes());
    let mut seen = 0;

    let err = parser
        .for_each_record(&mut cursor, |_| {
            seen += 1;
            if seen == 2 {
                Err(CsvError::Io("consumer gave up".to_string()))
            } else {
                Ok(())
            }
        })
        .unwrap_err();

    assert_eq!(seen, 2);
    assert_eq!(err, CsvError::Io("consumer gave up".to_string()));
}

/// Reader that fails after a fixed number of bytes
struct FailingReader {
    remaining: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.remaining == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "link dropped",
            ));
        }
        let n = self.remaining.min(buf.len());
        buf[..n].fill(b'x');
        self.remaining -= n;
        Ok(n)
    }
}

#[test]
fn test_streaming_io_error() {
    let mut parser = StreamingParser::with_defaults(Dialect::default());
    let mut reader = FailingReader { remaining: 10 };
    let err = parser.parse_from_reader(&mut reader).unwrap_err();
    assert_eq!(err, CsvError::Io("link dropped".to_string()));
}

#[test]
fn test_streaming_parse_from_file() {
    let path = std::env::temp_dir().join(format!("csvsplit-stream-{}.csv", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all("\u{FEFF}sku,desc\r\n42,\"Bolt, M6…\"\r\n".as_bytes())
            .unwrap();
    }

    let mut parser = StreamingParser::new(Dialect::default(), ChunkConfig::new(5));
    let result = parser.parse_from_file(&path);
    std::fs::remove_file(&path).unwrap();

    let result = result.unwrap();
    assert_eq!(
        result.records,
        vec![vec!["sku", "desc"], vec!["42", "Bolt, M6…"]]
    );
}

#[test]
fn test_streaming_missing_file() {
    let mut parser = StreamingParser::with_defaults(Dialect::default());
    let err = parser
        .parse_from_file("/nonexistent/csvsplit/input.csv")
        .unwrap_err();
    assert!(matches!(err, CsvError::Io(_)));
}

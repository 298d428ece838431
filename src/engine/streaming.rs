//! Streaming Parser for Large Inputs
//!
//! This module splits CSV arriving as bytes: from a [`Read`]er, a file, or
//! an iterator of chunks. Input is processed in fixed-size chunks and fed
//! straight into the [`Scanner`], so memory stays bounded by the chunk size
//! plus the record being assembled.
//!
//! # Architecture
//!
//! ```text
//!  Reader ──► [Chunk 0][Chunk 1][Chunk 2]...
//!                 │        │        │
//!                 ▼        ▼        ▼
//!            ┌──────────────────────────┐
//!            │ ChunkDecoder (UTF-8)     │  incomplete sequences carried over
//!            └────────────┬─────────────┘
//!                         ▼
//!            ┌──────────────────────────┐
//!            │ Scanner (state machine)  │  quote / CR state carried over
//!            └────────────┬─────────────┘
//!                         ▼
//!                      Records
//! ```
//!
//! A chunk boundary may fall anywhere: inside a multi-byte character,
//! between `\r` and `\n`, or inside a quoted field. The output is always the
//! same as [`CsvParser::parse`](super::parser::CsvParser::parse) on the
//! concatenated input, except that a leading UTF-8 byte order mark (written
//! by Excel) is dropped. Offsets in positions still count its bytes, so
//! errors point into the raw input.
//!
//! # Usage
//!
//! ```rust
//! use csvsplit::{ChunkConfig, Dialect, StreamingParser};
//! use std::io::Cursor;
//!
//! let mut parser = StreamingParser::new(Dialect::default(), ChunkConfig::new(4));
//! let mut reader = Cursor::new("id,name\n1,\"Ann\"\n".as_bytes());
//! let result = parser.parse_from_reader(&mut reader).unwrap();
//! assert_eq!(result.records, vec![vec!["id", "name"], vec!["1", "Ann"]]);
//! assert_eq!(result.chunks_processed, 4);
//! ```

use super::dialect::{Dialect, ParserConfig};
use super::error::{CsvError, CsvResult};
use super::record::{ParseResult, Record};
use super::scanner::Scanner;
use std::io::Read;

const BOM: char = '\u{FEFF}';

/// Configuration for chunk-based streaming parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Size of each chunk in bytes
    pub chunk_size: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024, // 64 KB
        }
    }
}

impl ChunkConfig {
    /// Create a new chunk configuration (a size of 0 is raised to 1)
    #[inline]
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Configuration for small inputs (16 KB chunks)
    #[inline]
    pub fn small() -> Self {
        Self::new(16 * 1024)
    }

    /// Configuration for medium inputs (64 KB chunks)
    #[inline]
    pub fn medium() -> Self {
        Self::default()
    }

    /// Configuration for large inputs (1 MB chunks)
    #[inline]
    pub fn large() -> Self {
        Self::new(1024 * 1024)
    }
}

/// Incremental UTF-8 decoder that tolerates sequences split across chunks
#[derive(Debug, Default)]
struct ChunkDecoder {
    /// Undecoded tail of the previous chunk (at most 3 bytes)
    carry: Vec<u8>,
    /// Bytes decoded so far
    offset: usize,
    /// Whether the first character has been inspected for a BOM
    bom_checked: bool,
}

impl ChunkDecoder {
    /// Decode as much of `carry + data` as forms complete characters into `out`
    ///
    /// Returns the number of bytes of a leading byte order mark removed
    /// from `out`.
    fn decode_into(&mut self, data: &[u8], out: &mut String) -> CsvResult<usize> {
        out.clear();
        self.carry.extend_from_slice(data);

        let valid = match std::str::from_utf8(&self.carry) {
            Ok(text) => {
                out.push_str(text);
                self.carry.len()
            }
            Err(err) => {
                let valid = err.valid_up_to();
                if err.error_len().is_some() {
                    return Err(CsvError::InvalidUtf8 {
                        offset: self.offset + valid,
                    });
                }
                let text = std::str::from_utf8(&self.carry[..valid]).map_err(|_| {
                    CsvError::InvalidUtf8 {
                        offset: self.offset,
                    }
                })?;
                out.push_str(text);
                valid
            }
        };
        self.carry.drain(..valid);
        self.offset += valid;

        if !self.bom_checked && !out.is_empty() {
            self.bom_checked = true;
            if out.starts_with(BOM) {
                out.drain(..BOM.len_utf8());
                return Ok(BOM.len_utf8());
            }
        }
        Ok(0)
    }

    /// Fail if input ended inside a character
    fn finish(&self) -> CsvResult<()> {
        if self.carry.is_empty() {
            Ok(())
        } else {
            Err(CsvError::InvalidUtf8 {
                offset: self.offset,
            })
        }
    }
}

/// Result of streaming parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingResult {
    /// The parsed records
    pub records: ParseResult,

    /// Total bytes processed
    pub bytes_processed: usize,

    /// Number of chunks processed
    pub chunks_processed: usize,
}

/// Streaming parser for large inputs
#[derive(Debug)]
pub struct StreamingParser {
    /// Dialect for every parse
    dialect: Dialect,

    /// Chunk configuration
    config: ChunkConfig,

    /// Resource limits
    limits: ParserConfig,

    /// Total bytes read
    total_bytes_read: usize,

    /// Chunks read
    chunks_processed: usize,

    /// Whether we've reached EOF
    eof_reached: bool,
}

impl StreamingParser {
    /// Create a new streaming parser
    #[inline]
    pub fn new(dialect: Dialect, config: ChunkConfig) -> Self {
        Self {
            dialect,
            config,
            limits: ParserConfig::default(),
            total_bytes_read: 0,
            chunks_processed: 0,
            eof_reached: false,
        }
    }

    /// Create a streaming parser with default chunk configuration
    #[inline]
    pub fn with_defaults(dialect: Dialect) -> Self {
        Self::new(dialect, ChunkConfig::default())
    }

    /// Replace the resource limits
    ///
    /// `max_input_size` applies to the total number of bytes read.
    #[inline]
    pub fn with_parser_config(mut self, limits: ParserConfig) -> Self {
        self.limits = limits;
        self
    }

    /// Call `on_record` for every record read from `reader`
    ///
    /// Only the current chunk and the record being assembled are held in
    /// memory. Returns the number of records delivered. An error from
    /// `on_record` stops the parse and is returned as-is.
    pub fn for_each_record<R, F>(&mut self, reader: &mut R, mut on_record: F) -> CsvResult<usize>
    where
        R: Read,
        F: FnMut(Record) -> CsvResult<()>,
    {
        self.reset();
        let mut scanner = Scanner::new(self.dialect, self.limits)?;
        let mut decoder = ChunkDecoder::default();
        let mut buffer = vec![0u8; self.config.chunk_size];
        let mut text = String::with_capacity(self.config.chunk_size);

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            self.consume_chunk(
                &buffer[..bytes_read],
                &mut decoder,
                &mut scanner,
                &mut text,
                &mut on_record,
            )?;
        }

        self.finish(&decoder, &mut scanner, &mut on_record)
    }

    /// Parse from a reader, collecting all records
    pub fn parse_from_reader<R: Read>(&mut self, reader: &mut R) -> CsvResult<StreamingResult> {
        let mut records = Vec::new();
        self.for_each_record(reader, |record| {
            records.push(record);
            Ok(())
        })?;
        Ok(self.result(records))
    }

    /// Parse from an iterator of byte chunks
    ///
    /// Chunks are used as given; `chunk_size` does not apply.
    pub fn parse_from_chunks<I>(&mut self, chunks: I) -> CsvResult<StreamingResult>
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        self.reset();
        let mut scanner = Scanner::new(self.dialect, self.limits)?;
        let mut decoder = ChunkDecoder::default();
        let mut text = String::new();
        let mut records = Vec::new();
        let mut collect = |record: Record| -> CsvResult<()> {
            records.push(record);
            Ok(())
        };

        for chunk in chunks {
            self.consume_chunk(&chunk, &mut decoder, &mut scanner, &mut text, &mut collect)?;
        }
        self.finish(&decoder, &mut scanner, &mut collect)?;

        Ok(self.result(records))
    }

    /// Parse from a file path
    pub fn parse_from_file<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> CsvResult<StreamingResult> {
        let mut file = std::fs::File::open(path)?;
        self.parse_from_reader(&mut file)
    }

    fn consume_chunk<F>(
        &mut self,
        chunk: &[u8],
        decoder: &mut ChunkDecoder,
        scanner: &mut Scanner,
        text: &mut String,
        on_record: &mut F,
    ) -> CsvResult<()>
    where
        F: FnMut(Record) -> CsvResult<()>,
    {
        self.total_bytes_read += chunk.len();
        self.chunks_processed += 1;
        self.limits.check_input_size(self.total_bytes_read)?;

        let stripped = decoder.decode_into(chunk, text)?;
        if stripped > 0 {
            scanner.skip_leading_bytes(stripped);
        }
        let mut cursor = 0;
        while let Some(record) = scanner.next_record(text, &mut cursor)? {
            on_record(record)?;
        }
        Ok(())
    }

    fn finish<F>(
        &mut self,
        decoder: &ChunkDecoder,
        scanner: &mut Scanner,
        on_record: &mut F,
    ) -> CsvResult<usize>
    where
        F: FnMut(Record) -> CsvResult<()>,
    {
        self.eof_reached = true;
        decoder.finish()?;
        if let Some(record) = scanner.finish()? {
            on_record(record)?;
        }

        log_debug!(
            "stream finished: {} bytes in {} chunks, {} records",
            self.total_bytes_read,
            self.chunks_processed,
            scanner.records_emitted()
        );
        Ok(scanner.records_emitted())
    }

    fn result(&self, records: Vec<Record>) -> StreamingResult {
        StreamingResult {
            records: ParseResult::new(records),
            bytes_processed: self.total_bytes_read,
            chunks_processed: self.chunks_processed,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.total_bytes_read = 0;
        self.chunks_processed = 0;
        self.eof_reached = false;
    }

    /// Check if EOF has been reached
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof_reached
    }

    /// Get the total bytes read so far
    #[inline]
    pub fn total_bytes_read(&self) -> usize {
        self.total_bytes_read
    }
}

//! Header-keyed views over parse results
//!
//! The parser itself never assumes a schema. [`Table`] adds one on request:
//! the first record names the columns and later records are addressed by
//! column name.
//!
//! # Example
//!
//! ```rust
//! use csvsplit::{parse, HeaderMode, Table};
//!
//! let result = parse("id,amount\n1,12345678901234…\n", ',', '"').unwrap();
//! let table = Table::from_result(result, HeaderMode::Strict).unwrap();
//! assert_eq!(table.get(0, "amount"), Some("12345678901234…"));
//! assert_eq!(
//!     table.to_json(),
//!     serde_json::json!([{ "id": "1", "amount": "12345678901234…" }])
//! );
//! ```

use super::error::{CsvError, CsvResult};
use super::record::{ParseResult, Record};
use hashbrown::HashMap;
use serde_json::{Map, Value};

/// How rows whose width differs from the header row are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Accept ragged rows; missing cells read as absent
    #[default]
    Flexible,
    /// Reject any row whose field count differs from the header's
    Strict,
}

/// Records addressed by column name
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Record>,
    /// Header name to first column carrying it
    index: HashMap<String, usize, ahash::RandomState>,
}

impl Table {
    /// Build a table whose first record is the header row
    ///
    /// An empty result gives an empty table with no columns.
    pub fn from_result(result: ParseResult, mode: HeaderMode) -> CsvResult<Self> {
        let mut records = result.into_records().into_iter();
        let headers = records.next().map(Record::into_fields).unwrap_or_default();
        let rows: Vec<Record> = records.collect();

        if mode == HeaderMode::Strict {
            if let Some((i, row)) = rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != headers.len())
            {
                return Err(CsvError::FieldCountMismatch {
                    record: i + 1,
                    expected: headers.len(),
                    actual: row.len(),
                });
            }
        }

        let mut index = HashMap::with_capacity_and_hasher(headers.len(), ahash::RandomState::new());
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }

        Ok(Self {
            headers,
            rows,
            index,
        })
    }

    /// Column names, in input order
    #[inline]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows (the header row excluded)
    #[inline]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of data rows
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column called `name`
    #[inline]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Cell at data row `row`, column `name`
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let column = self.column_index(name)?;
        self.rows.get(row)?.get(column)
    }

    /// Every cell of column `name`; short rows give `None`
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let column = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row.get(column)).collect())
    }

    /// Convert to a JSON array with one object per data row
    ///
    /// Keys follow header order. Missing cells become `null` and cells
    /// beyond the last header are dropped. A repeated header name maps to
    /// its first column.
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .headers
                    .iter()
                    .enumerate()
                    .filter(|(column, name)| self.column_index(name) == Some(*column))
                    .map(|(column, name)| {
                        let cell = row
                            .get(column)
                            .map(|field| Value::String(field.to_string()))
                            .unwrap_or(Value::Null);
                        (name.clone(), cell)
                    })
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }
}

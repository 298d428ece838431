//! Records and parse results
//!
//! A [`Record`] is one logical row. A [`ParseResult`] is every record of an
//! input, in input order. Both compare directly against nested vectors of
//! string slices, which keeps assertions short:
//!
//! ```rust
//! let result = csvsplit::parse("a,b\nc,d\n", ',', '"').unwrap();
//! assert_eq!(result, vec![vec!["a", "b"], vec!["c", "d"]]);
//! assert_eq!(result[1], vec!["c", "d"]);
//! ```

use super::source_location::SourcePosition;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One row: an ordered sequence of fields
///
/// Equality only looks at the fields; the start position is diagnostic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<String>,
    #[serde(skip)]
    position: SourcePosition,
}

impl Record {
    /// Create a record from its fields
    pub fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            position: SourcePosition::start(),
        }
    }

    pub(crate) fn at(fields: Vec<String>, position: SourcePosition) -> Self {
        Self { fields, position }
    }

    /// Where the record starts in the input
    #[inline]
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// The fields of this record
    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field at `index`, if present
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Number of fields
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the fields as string slices
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Take ownership of the fields
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Record {}

impl<S: AsRef<str>> PartialEq<[S]> for Record {
    fn eq(&self, other: &[S]) -> bool {
        self.fields.len() == other.len()
            && self
                .fields
                .iter()
                .zip(other)
                .all(|(a, b)| a.as_str() == b.as_ref())
    }
}

impl<S: AsRef<str>> PartialEq<Vec<S>> for Record {
    fn eq(&self, other: &Vec<S>) -> bool {
        *self == other[..]
    }
}

impl Index<usize> for Record {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.fields[index]
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Record::new(fields)
    }
}

impl IntoIterator for Record {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Every record of an input, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParseResult {
    records: Vec<Record>,
}

impl ParseResult {
    /// Create a result from records
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// The records
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, if present
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Iterate over the records
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Take ownership of the records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Copy out as plain nested vectors
    pub fn to_vecs(&self) -> Vec<Vec<String>> {
        self.records.iter().map(|r| r.fields.clone()).collect()
    }

    /// Convert to a JSON array of arrays of strings
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.records
                .iter()
                .map(|record| {
                    serde_json::Value::Array(
                        record
                            .iter()
                            .map(|field| serde_json::Value::String(field.to_string()))
                            .collect(),
                    )
                })
                .collect(),
        )
    }
}

impl<S: AsRef<str>> PartialEq<Vec<Vec<S>>> for ParseResult {
    fn eq(&self, other: &Vec<Vec<S>>) -> bool {
        self.records.len() == other.len()
            && self.records.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl Index<usize> for ParseResult {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl From<Vec<Record>> for ParseResult {
    fn from(records: Vec<Record>) -> Self {
        ParseResult::new(records)
    }
}

impl FromIterator<Record> for ParseResult {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        ParseResult::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ParseResult {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseResult {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

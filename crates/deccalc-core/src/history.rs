//! Calculation history store and its CSV persistence.
//!
//! The store is an ordered sequence of [`HistoryRecord`]s. A record's index is
//! its current position, so deleting index `i` shifts every later record down
//! by one. The store is an owned value; callers pass it by reference.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::CalcError;
use crate::constants::HISTORY_COLUMNS;

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub operation: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub num1: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub num2: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub result: Decimal,
}

impl HistoryRecord {
    #[must_use]
    pub fn new(operation: impl Into<String>, num1: Decimal, num2: Decimal, result: Decimal) -> Self {
        Self {
            operation: operation.into(),
            num1,
            num2,
            result,
        }
    }
}

/// Ordered, indexable collection of history records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the end.
    pub fn append(&mut self, record: HistoryRecord) {
        tracing::debug!(operation = %record.operation, index = self.records.len(), "history append");
        self.records.push(record);
    }

    /// Remove every record. Idempotent.
    pub fn clear(&mut self) {
        tracing::debug!(removed = self.records.len(), "history cleared");
        self.records.clear();
    }

    /// All records, in order.
    #[must_use]
    pub fn all(&self) -> &[HistoryRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recently appended record.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    /// Records whose operation equals `name`, paired with their current
    /// index, in original order.
    #[must_use]
    pub fn filter_by_operation(&self, name: &str) -> Vec<(usize, &HistoryRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.operation == name)
            .collect()
    }

    /// Remove the record at `index`, compacting later indices.
    pub fn delete(&mut self, index: usize) -> Result<HistoryRecord, CalcError> {
        if index >= self.records.len() {
            return Err(CalcError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        tracing::debug!(index, "history record deleted");
        Ok(removed)
    }

    /// Parse user-supplied index text and check it against the current length.
    pub fn resolve_index(&self, text: &str) -> Result<usize, CalcError> {
        let index: i64 = text
            .trim()
            .parse()
            .map_err(|_| CalcError::InvalidIndex(text.to_string()))?;
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.records.len())
            .ok_or(CalcError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
    }

    /// Write every record to `path` as CSV, header first. Overwrites.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CalcError> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(csv_error)?;
        writer.write_record(HISTORY_COLUMNS).map_err(csv_error)?;
        for record in &self.records {
            writer.serialize(record).map_err(csv_error)?;
        }
        writer.flush()?;
        tracing::info!(path = %path.display(), records = self.records.len(), "history saved");
        Ok(())
    }

    /// Replace the whole store with the contents of `path`.
    ///
    /// The file is parsed completely before the store is touched, so a
    /// failed load leaves the current records in place. Returns the number
    /// of records loaded.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize, CalcError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CalcError::FileNotFound(path.to_path_buf()),
            _ => CalcError::Io(e),
        })?;
        self.records = read_records(file)?;
        tracing::info!(path = %path.display(), records = self.records.len(), "history loaded");
        Ok(self.records.len())
    }
}

fn read_records<R: Read>(source: R) -> Result<Vec<HistoryRecord>, CalcError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(csv_error)?;
    if headers.iter().ne(HISTORY_COLUMNS) {
        return Err(CalcError::MalformedHistoryFile(format!(
            "expected header '{}', found '{}'",
            HISTORY_COLUMNS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    reader
        .deserialize()
        .map(|row| row.map_err(csv_error))
        .collect()
}

fn csv_error(err: csv::Error) -> CalcError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => CalcError::Io(e),
        _ => CalcError::MalformedHistoryFile(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(op: &str, a: &str, b: &str, r: &str) -> HistoryRecord {
        HistoryRecord::new(op, d(a), d(b), d(r))
    }

    fn sample() -> HistoryStore {
        let mut store = HistoryStore::new();
        store.append(record("add", "2", "3", "5"));
        store.append(record("subtract", "5", "3", "2"));
        store.append(record("add", "1.5", "1", "2.5"));
        store
    }

    #[test]
    fn new_store_is_empty() {
        let store = HistoryStore::new();
        assert!(store.is_empty());
        assert!(store.latest().is_none());
    }

    #[test]
    fn append_adds_at_end() {
        let store = sample();
        assert_eq!(store.len(), 3);
        assert_eq!(store.latest().unwrap(), &record("add", "1.5", "1", "2.5"));
    }

    #[test]
    fn clear_twice() {
        let mut store = sample();
        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn filter_keeps_order_and_indices() {
        let store = sample();
        let adds = store.filter_by_operation("add");
        assert_eq!(adds.len(), 2);
        assert_eq!(adds[0].0, 0);
        assert_eq!(adds[1].0, 2);
        assert_eq!(adds[1].1.result, d("2.5"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn filter_no_match_is_empty() {
        assert!(sample().filter_by_operation("median").is_empty());
    }

    #[test]
    fn delete_shifts_later_records() {
        let mut store = sample();
        let removed = store.delete(1).unwrap();
        assert_eq!(removed.operation, "subtract");
        assert_eq!(store.all()[0], record("add", "2", "3", "5"));
        assert_eq!(store.all()[1], record("add", "1.5", "1", "2.5"));
    }

    #[test]
    fn delete_out_of_range_leaves_store() {
        let mut store = sample();
        let before = store.clone();
        let err = store.delete(10).unwrap_err();
        assert!(matches!(
            err,
            CalcError::IndexOutOfRange { index: 10, len: 3 }
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn resolve_index_bounds() {
        let store = sample();
        assert_eq!(store.resolve_index("0").unwrap(), 0);
        assert_eq!(store.resolve_index(" 2 ").unwrap(), 2);
        assert!(matches!(
            store.resolve_index("-1"),
            Err(CalcError::IndexOutOfRange { index: -1, len: 3 })
        ));
        assert!(matches!(
            store.resolve_index("3"),
            Err(CalcError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            store.resolve_index("one"),
            Err(CalcError::InvalidIndex(_))
        ));
    }

    #[test]
    fn save_writes_header_and_plain_decimals() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        sample().save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "operation,num1,num2,result");
        assert_eq!(lines[1], "add,2,3,5");
        assert_eq!(lines[3], "add,1.5,1,2.5");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn save_empty_store_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        HistoryStore::new().save(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "operation,num1,num2,result");

        let mut store = sample();
        assert_eq!(store.load(&path).unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn save_clear_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let mut store = sample();
        let before = store.clone();

        store.save(&path).unwrap();
        store.clear();
        assert_eq!(store.load(&path).unwrap(), 3);
        assert_eq!(store, before);
    }

    #[test]
    fn load_replaces_instead_of_merging() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let mut saved = HistoryStore::new();
        saved.append(record("multiply", "5", "6", "30"));
        saved.save(&path).unwrap();

        let mut store = sample();
        store.load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].operation, "multiply");
    }

    #[test]
    fn load_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut store = sample();
        let err = store.load(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, CalcError::FileNotFound(_)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn load_wrong_header_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "op,a,b,r\nadd,1,2,3\n").unwrap();

        let mut store = sample();
        let err = store.load(&path).unwrap_err();
        assert!(matches!(err, CalcError::MalformedHistoryFile(_)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn load_empty_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            HistoryStore::new().load(&path),
            Err(CalcError::MalformedHistoryFile(_))
        ));
    }

    #[test]
    fn load_bad_decimal_is_malformed_and_atomic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "operation,num1,num2,result\nadd,1,2,3\nadd,x,2,3\n",
        )
        .unwrap();

        let mut store = sample();
        let err = store.load(&path).unwrap_err();
        assert!(matches!(err, CalcError::MalformedHistoryFile(_)));
        assert_eq!(store, sample());
    }

    #[test]
    fn read_records_accepts_padded_fields() {
        let data = "operation, num1, num2, result\nmean, 3, 4, 3.5\n";
        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records, vec![record("mean", "3", "4", "3.5")]);
    }
}

//! Data source abstraction and metadata.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WardstatError};
use crate::schema::TableKind;

/// Metadata about a loaded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, csv-semicolon, tsv, ...).
    pub format: String,
    /// Detected encoding.
    pub encoding: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            encoding: "utf-8".to_string(),
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Locations of the four input files for one report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub patients: PathBuf,
    pub staff: PathBuf,
    pub operations: PathBuf,
    pub finance: PathBuf,
}

impl DatasetPaths {
    /// Use the conventional file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            patients: dir.join(TableKind::Patients.default_file_name()),
            staff: dir.join(TableKind::Staff.default_file_name()),
            operations: dir.join(TableKind::Operations.default_file_name()),
            finance: dir.join(TableKind::Finance.default_file_name()),
        }
    }

    /// Path of the file backing `kind`.
    pub fn path_for(&self, kind: TableKind) -> &Path {
        match kind {
            TableKind::Patients => &self.patients,
            TableKind::Staff => &self.staff,
            TableKind::Operations => &self.operations,
            TableKind::Finance => &self.finance,
        }
    }

    /// Override the path of one table.
    pub fn set(&mut self, kind: TableKind, path: PathBuf) {
        match kind {
            TableKind::Patients => self.patients = path,
            TableKind::Staff => self.staff = path,
            TableKind::Operations => self.operations = path,
            TableKind::Finance => self.finance = path,
        }
    }
}

/// A single cell.
///
/// `Missing` is the missing-value marker: it never equals a data value, and
/// aggregates skip it. `Number` never holds NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Missing,
    Number(f64),
    Text(String),
}

impl Value {
    /// Build a cell from raw file text, recognising null spellings.
    pub fn from_raw(raw: &str) -> Self {
        if DataTable::is_null_value(raw) {
            Value::Missing
        } else {
            Value::Text(raw.to_string())
        }
    }

    /// Build a numeric cell; NaN becomes `Missing`.
    pub fn number(n: f64) -> Self {
        if n.is_nan() {
            Value::Missing
        } else {
            Value::Number(n)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text content of a categorical cell.
    ///
    /// Numbers are rendered so that numeric category codes still group.
    pub fn as_category(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            Value::Text(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Hashable view of a cell, used for exact-duplicate detection.
#[derive(PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Missing,
    Number(u64),
    Text(&'a str),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Missing => CellKey::Missing,
            // -0.0 and 0.0 are the same value
            Value::Number(n) if *n == 0.0 => CellKey::Number(0f64.to_bits()),
            Value::Number(n) => CellKey::Number(n.to_bits()),
            Value::Text(s) => CellKey::Text(s),
        }
    }
}

/// A borrowed row that can be hashed and compared cell by cell.
pub(crate) struct RowKey<'a>(Vec<CellKey<'a>>);

impl<'a> RowKey<'a> {
    pub(crate) fn new(row: &'a [Value]) -> Self {
        Self(row.iter().map(CellKey::from).collect())
    }
}

impl PartialEq for RowKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for RowKey<'_> {}

impl Hash for RowKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

static MISSING: Value = Value::Missing;

/// Cell texts read as missing.
const NULL_SPELLINGS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Represents parsed tabular data.
#[derive(Debug, Clone, Serialize)]
pub struct DataTable {
    /// Table name used in error messages and reports.
    pub name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Value>>,
    /// The delimiter used.
    #[serde(skip)]
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<Value>>,
        delimiter: u8,
    ) -> Self {
        let mut table = Self {
            name: name.into(),
            headers,
            rows,
            delimiter,
        };
        table.conform_rows();
        table
    }

    /// Pad short rows with missing cells and truncate long ones to the header width.
    pub fn conform_rows(&mut self) {
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, Value::Missing);
        }
    }

    /// Build a table from string literals; empty and null spellings become `Missing`.
    pub fn from_strings(name: impl Into<String>, headers: &[&str], rows: &[Vec<&str>]) -> Self {
        Self::new(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| Value::from_raw(cell)).collect())
                .collect(),
            b';',
        )
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a column the caller cannot do without.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| WardstatError::MissingColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&MISSING))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Cell at `col` of `row`; `Missing` where the row is too short.
    pub fn cell(row: &[Value], col: usize) -> &Value {
        row.get(col).unwrap_or(&MISSING)
    }

    /// Overwrite a cell. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: Value) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Append a column, or overwrite it if a column with that name exists.
    ///
    /// `values` must have one entry per row.
    pub fn put_column(&mut self, name: &str, values: Vec<Value>) -> usize {
        debug_assert_eq!(values.len(), self.rows.len());
        self.conform_rows();
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
                idx
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
                self.headers.len() - 1
            }
        }
    }

    /// Copy of this table keeping only the rows at `indices`, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> DataTable {
        DataTable {
            name: self.name.clone(),
            headers: self.headers.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
            delimiter: self.delimiter,
        }
    }

    /// Check if a raw value is one of the default pandas NA spellings.
    /// Matching is exact: no trimming, no case folding.
    pub fn is_null_value(value: &str) -> bool {
        NULL_SPELLINGS.contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_raw() {
        assert_eq!(Value::from_raw(""), Value::Missing);
        assert_eq!(Value::from_raw("NaN"), Value::Missing);
        assert_eq!(Value::from_raw("  NaN "), Value::Text("  NaN ".to_string()));
        assert_eq!(Value::from_raw("flu"), Value::Text("flu".to_string()));
        assert_eq!(Value::number(f64::NAN), Value::Missing);
    }

    #[test]
    fn test_require_column_names_table() {
        let table = DataTable::from_strings("staff", &["name"], &[vec!["Ann"]]);
        let err = table.require_column("role").unwrap_err();
        assert_eq!(err.to_string(), "Missing column 'role' in table 'staff'");
    }

    #[test]
    fn test_put_column_appends_then_overwrites() {
        let mut table = DataTable::from_strings("t", &["a"], &[vec!["1"], vec!["2"]]);
        let idx = table.put_column("b", vec![Value::Number(1.0), Value::Missing]);
        assert_eq!(idx, 1);
        assert_eq!(table.headers, vec!["a", "b"]);

        let idx = table.put_column("b", vec![Value::Number(5.0), Value::Number(6.0)]);
        assert_eq!(idx, 1);
        assert_eq!(table.get(1, 1), Some(&Value::Number(6.0)));
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_new_conforms_row_width() {
        let table = DataTable::new(
            "t",
            vec!["a".into(), "b".into()],
            vec![
                vec![Value::Text("x".into())],
                vec![Value::Missing, Value::Missing, Value::Text("extra".into())],
            ],
            b';',
        );
        assert_eq!(table.rows[0], vec![Value::Text("x".into()), Value::Missing]);
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn test_put_column_lines_up_after_rows_pushed_short() {
        let mut table = DataTable::from_strings("t", &["a", "b"], &[vec!["1", "2"]]);
        table.rows.push(vec![Value::Text("3".into())]);
        let idx = table.put_column("c", vec![Value::Number(1.0), Value::Number(2.0)]);

        assert_eq!(idx, 2);
        assert_eq!(table.get(1, 1), Some(&Value::Missing));
        assert_eq!(table.get(1, 2), Some(&Value::Number(2.0)));
        assert_eq!(DataTable::cell(&[Value::Number(1.0)], 3), &Value::Missing);
    }

    #[test]
    fn test_row_key_treats_missing_as_equal() {
        let a = vec![Value::Missing, Value::Text("x".into())];
        let b = vec![Value::Missing, Value::Text("x".into())];
        let c = vec![Value::Number(0.0), Value::Text("x".into())];
        assert!(RowKey::new(&a) == RowKey::new(&b));
        assert!(RowKey::new(&a) != RowKey::new(&c));
        assert!(RowKey::new(&[Value::Number(-0.0)]) == RowKey::new(&[Value::Number(0.0)]));
    }

    #[test]
    fn test_dataset_paths_in_dir() {
        let paths = DatasetPaths::in_dir("/data");
        assert_eq!(paths.patients, PathBuf::from("/data/Patients.csv"));
        assert_eq!(paths.path_for(TableKind::Finance), Path::new("/data/Finance.csv"));
    }
}

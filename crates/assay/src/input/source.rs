//! Data source abstraction and metadata.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::{Value, ValueType};

/// Where a [`DataTable`] came from, recorded in check reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub file: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// `csv`, `tsv`, `csv-semicolon`, `psv` or `delimited`.
    pub format: String,
    /// Data rows, header excluded.
    pub row_count: usize,
    pub column_count: usize,
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe `table`, read from `path` using `delimiter`.
    pub fn describe(path: &Path, size_bytes: u64, delimiter: u8, table: &DataTable) -> Self {
        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        };

        Self {
            file: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            size_bytes,
            format: format.to_string(),
            row_count: table.row_count(),
            column_count: table.column_count(),
            loaded_at: Utc::now(),
        }
    }
}

/// A named, ordered sequence of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
    timezone: Option<FixedOffset>,
}

impl Column {
    /// Create a column from its values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
            timezone: None,
        }
    }

    /// Declare the timezone of a datetime column explicitly.
    pub fn with_timezone(mut self, offset: FixedOffset) -> Self {
        self.timezone = Some(offset);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Timezone of the column.
    ///
    /// The declared offset if there is one, otherwise the offset shared by every non-null
    /// value when all of them are zoned datetimes.
    pub fn timezone(&self) -> Option<FixedOffset> {
        if self.timezone.is_some() {
            return self.timezone;
        }

        let mut offsets = self.values.iter().filter(|v| !v.is_null()).map(Value::offset);
        let first = offsets.next()??;
        offsets.all(|o| o == Some(first)).then_some(first)
    }

    /// Whether the datetimes of this column carry timezone offsets.
    ///
    /// True for a declared timezone. Otherwise no non-null value may be a naive datetime and
    /// at least one value must be zoned. Offsets may differ between values.
    pub fn is_timezone_aware(&self) -> bool {
        if self.timezone.is_some() {
            return true;
        }

        let mut zoned = false;
        for value in &self.values {
            match value {
                Value::DateTimeTz(_) => zoned = true,
                Value::DateTime(_) => return false,
                _ => {}
            }
        }
        zoned
    }

    /// The single type shared by all non-null values, if there is one.
    pub fn dtype(&self) -> Option<ValueType> {
        let mut types = self
            .values
            .iter()
            .filter(|v| !v.is_null())
            .map(Value::value_type);
        let first = types.next()?;
        types.all(|t| t == first).then_some(first)
    }

    /// Number of null values.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}

/// A columnar dataset that a schema can be validated against.
///
/// The engine only reads through this trait and never mutates the data.
pub trait Dataset {
    /// Names of the columns present, in dataset order.
    fn column_names(&self) -> Vec<&str>;

    /// Look up a column by name.
    fn column(&self, name: &str) -> Option<&Column>;

    /// Check whether a column is present.
    fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// In-memory columnar table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: IndexMap<String, Column>,
}

impl DataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from columns. A later column replaces an earlier one with the same name.
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Self {
        let mut table = Self::new();
        for column in columns {
            table.insert(column);
        }
        table
    }

    /// Add or replace a column.
    pub fn insert(&mut self, column: Column) {
        self.columns.insert(column.name.clone(), column);
    }

    /// Builder-style variant of [`DataTable::insert`].
    pub fn with_column(mut self, column: Column) -> Self {
        self.insert(column);
        self
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (length of the longest column).
    pub fn row_count(&self) -> usize {
        self.columns.values().map(Column::len).max().unwrap_or(0)
    }

    /// Iterate over the columns in order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }
}

impl Dataset for DataTable {
    fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc_plus(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[test]
    fn test_timezone_inferred_from_values() {
        let offset = utc_plus(2);
        let column = Column::new(
            "ts",
            vec![
                offset.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().into(),
                offset.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap().into(),
            ],
        );
        assert_eq!(column.timezone(), Some(offset));
    }

    #[test]
    fn test_timezone_absent_for_naive_or_mixed() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let zoned = utc_plus(1).with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(Column::new("ts", vec![naive.into()]).timezone(), None);
        assert_eq!(Column::new("ts", vec![zoned.into(), naive.into()]).timezone(), None);
        assert_eq!(Column::new("ts", vec![]).timezone(), None);
        assert_eq!(
            Column::new("ts", vec![]).with_timezone(utc_plus(0)).timezone(),
            Some(utc_plus(0))
        );
    }

    #[test]
    fn test_describe_source() {
        let mut table = DataTable::new();
        table.insert(Column::new("a", vec![Value::Integer(1), Value::Integer(2)]));
        let source = SourceMetadata::describe(Path::new("/data/batch.tsv"), 12, b'\t', &table);

        assert_eq!(source.file, "batch.tsv");
        assert_eq!(source.format, "tsv");
        assert_eq!(source.row_count, 2);
        assert_eq!(source.column_count, 1);
        assert_eq!(SourceMetadata::describe(Path::new("x"), 0, b'#', &table).format, "delimited");
    }

    #[test]
    fn test_timezone_aware_with_mixed_offsets() {
        let column = Column::new(
            "ts",
            vec![
                utc_plus(1).with_ymd_and_hms(2024, 3, 30, 10, 0, 0).unwrap().into(),
                utc_plus(2).with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap().into(),
            ],
        );
        assert!(column.is_timezone_aware());
        assert_eq!(column.timezone(), None);
    }

    #[test]
    fn test_timezone_aware_ignores_nulls() {
        let column = Column::new(
            "ts",
            vec![
                utc_plus(0).with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().into(),
                Value::Null,
            ],
        );
        assert!(column.is_timezone_aware());
        assert_eq!(column.timezone(), Some(utc_plus(0)));
    }

    #[test]
    fn test_not_timezone_aware() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let zoned = utc_plus(1).with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert!(!Column::new("ts", vec![zoned.into(), naive.into()]).is_timezone_aware());
        assert!(!Column::new("ts", vec![Value::Null]).is_timezone_aware());
        assert!(!Column::new("ts", vec![]).is_timezone_aware());
        assert!(Column::new("ts", vec![]).with_timezone(utc_plus(0)).is_timezone_aware());
    }

    #[test]
    fn test_dtype_ignores_nulls() {
        let column = Column::new("n", vec![1i64.into(), Value::Null, 3i64.into()]);
        assert_eq!(column.dtype(), Some(ValueType::Integer));
        assert_eq!(column.null_count(), 1);

        let mixed = Column::new("n", vec![1i64.into(), "a".into()]);
        assert_eq!(mixed.dtype(), None);
    }

    #[test]
    fn test_table_preserves_column_order() {
        let table = DataTable::from_columns(vec![
            Column::new("b", vec![1i64.into()]),
            Column::new("a", vec![1i64.into(), 2i64.into()]),
        ]);
        assert_eq!(table.column_names(), vec!["b", "a"]);
        assert_eq!(table.row_count(), 2);
        assert!(table.has_column("a"));
        assert!(!table.has_column("c"));
    }
}

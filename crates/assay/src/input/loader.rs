//! Delimited-text loader with delimiter detection and cell type inference.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use super::source::{Column, DataTable, SourceMetadata};
use super::value::Value;
use crate::error::{AssayError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Records inspected when detecting the delimiter.
const SAMPLE_RECORDS: usize = 10;

/// Naive datetime layouts accepted by the loader.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads delimited files into a [`DataTable`].
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a new loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file and return the table and its metadata.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source| AssayError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => self.detect_delimiter(&contents)?,
        };

        let table = self.load_bytes(&contents, delimiter)?;
        let metadata = SourceMetadata::describe(path, size_bytes, delimiter, &table);

        debug!(
            path = %path.display(),
            format = %metadata.format,
            rows = metadata.row_count,
            columns = metadata.column_count,
            "loaded data file"
        );

        Ok((table, metadata))
    }

    /// Pick the delimiter that splits the leading records into the same, largest number of
    /// fields. Ties go to tab, then to the order of [`DELIMITERS`].
    fn detect_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        let candidates = DELIMITERS.iter().enumerate().filter_map(|(rank, &delimiter)| {
            let widths = self.sample_widths(bytes, delimiter);
            let header = *widths.first()?;
            if header < 2 {
                return None;
            }
            let consistent = widths.iter().all(|&w| w == header);
            Some(((consistent, header, delimiter == b'\t', usize::MAX - rank), delimiter))
        });

        match candidates.max_by_key(|(score, _)| *score) {
            Some((_, delimiter)) => Ok(delimiter),
            None if bytes.iter().all(u8::is_ascii_whitespace) => {
                Err(AssayError::EmptyData("No lines to analyze".to_string()))
            }
            None => Ok(b','),
        }
    }

    /// Field counts of the first records when split on `delimiter`.
    fn sample_widths(&self, bytes: &[u8], delimiter: u8) -> Vec<usize> {
        csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(self.config.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .byte_records()
            .take(SAMPLE_RECORDS)
            .map_while(|record| record.ok())
            .filter(|record| !(record.len() == 1 && record[0].trim_ascii().is_empty()))
            .map(|record| record.len())
            .collect()
    }

    /// Load delimited bytes. The first record is the header row.
    pub fn load_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        if !delimiter.is_ascii() || delimiter == self.config.quote {
            return Err(AssayError::InvalidDelimiter(format!("{:?}", delimiter as char)));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(AssayError::EmptyData("No columns found".to_string()));
        }

        let mut cells: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            // Short rows are padded with nulls, extra fields are dropped.
            for (col_idx, column) in cells.iter_mut().enumerate() {
                column.push(record.get(col_idx).map(parse_cell).unwrap_or(Value::Null));
            }
        }

        Ok(DataTable::from_columns(
            headers
                .into_iter()
                .zip(cells)
                .map(|(name, values)| Column::new(name, values)),
        ))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a raw cell represents a missing value.
pub fn is_null_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
}

/// Infer the typed value of a raw cell.
pub fn parse_cell(raw: &str) -> Value {
    if is_null_token(raw) {
        return Value::Null;
    }

    let trimmed = raw.trim();

    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return Value::Float(f);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Value::DateTimeTz(dt);
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Value::DateTime(dt);
        }
    }
    if let Some(dt) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Value::DateTime(dt);
    }

    Value::String(raw.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Dataset, ValueType};

    #[test]
    fn test_detect_delimiter() {
        let loader = Loader::new();
        assert_eq!(loader.detect_delimiter(b"a,b,c\n1,2,3\n4,5,6").unwrap(), b',');
        assert_eq!(loader.detect_delimiter(b"a\tb\tc\n1\t2\t3").unwrap(), b'\t');
        assert_eq!(loader.detect_delimiter(b"a;b\n1;2\n").unwrap(), b';');
        assert_eq!(loader.detect_delimiter(b"only\n1\n2").unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_delimiters() {
        let loader = Loader::new();
        let data = b"name;note\n\"Smith, J\";\"a, b, c\"\nLee;plain";
        assert_eq!(loader.detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_prefers_consistent_width() {
        let loader = Loader::new();
        // Commas appear in the body only; pipes split every record the same way.
        let data = b"a|b\n1,5|2\n3|4,0,1";
        assert_eq!(loader.detect_delimiter(data).unwrap(), b'|');
    }

    #[test]
    fn test_detect_delimiter_empty() {
        let loader = Loader::new();
        assert!(matches!(loader.detect_delimiter(b" \n\n"), Err(AssayError::EmptyData(_))));
    }

    #[test]
    fn test_zoned_column_across_dst_change() {
        let data = b"at\n2024-03-30T10:00:00+01:00\n2024-04-01T10:00:00+02:00\n";
        let table = Loader::new().load_bytes(data, b',').unwrap();
        let column = table.column("at").unwrap();
        assert!(column.is_timezone_aware());
        assert_eq!(column.timezone(), None);
    }

    #[test]
    fn test_load_bytes_infers_types() {
        let loader = Loader::new();
        let data = b"name,age,score,active\nAlice,30,1.5,true\nBob,25,NA,false";
        let table = loader.load_bytes(data, b',').unwrap();

        assert_eq!(table.column_names(), vec!["name", "age", "score", "active"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("name").unwrap().dtype(), Some(ValueType::String));
        assert_eq!(table.column("age").unwrap().dtype(), Some(ValueType::Integer));
        assert_eq!(table.column("score").unwrap().values()[1], Value::Null);
        assert_eq!(table.column("active").unwrap().dtype(), Some(ValueType::Boolean));
    }

    #[test]
    fn test_short_rows_padded_with_null() {
        let loader = Loader::new();
        let table = loader.load_bytes(b"a,b\n1\n2,3", b',').unwrap();
        assert_eq!(table.column("b").unwrap().values(), &[Value::Null, Value::Integer(3)]);
    }

    #[test]
    fn test_max_rows() {
        let loader = Loader::with_config(LoaderConfig {
            max_rows: Some(1),
            ..LoaderConfig::default()
        });
        let table = loader.load_bytes(b"a\n1\n2\n3", b',').unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_parse_cell_datetimes() {
        assert!(matches!(parse_cell("2024-03-01T10:00:00+02:00"), Value::DateTimeTz(_)));
        assert!(matches!(parse_cell("2024-03-01T10:00:00Z"), Value::DateTimeTz(_)));
        assert!(matches!(parse_cell("2024-03-01 10:00:00"), Value::DateTime(_)));
        assert!(matches!(parse_cell("2024-03-01"), Value::DateTime(_)));
    }

    #[test]
    fn test_parse_cell_scalars() {
        assert_eq!(parse_cell(" 42 "), Value::Integer(42));
        assert_eq!(parse_cell("-0.5"), Value::Float(-0.5));
        assert_eq!(parse_cell("TRUE"), Value::Boolean(true));
        assert_eq!(parse_cell("n/a"), Value::Null);
        assert_eq!(parse_cell("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_is_null_token() {
        assert!(is_null_token(""));
        assert!(is_null_token("NA"));
        assert!(is_null_token("NaN"));
        assert!(is_null_token("null"));
        assert!(!is_null_token("value"));
        assert!(!is_null_token("0"));
    }
}

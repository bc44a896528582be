//! Error types for the Assay library.
//!
//! Data violations found while validating are [`ValidationError`](crate::ValidationError)s;
//! this module covers everything around the engine (loading, schema construction).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Two descriptors in one schema refer to the same column.
    #[error("Column '{0}' is declared more than once in the schema")]
    DuplicateColumn(String),

    /// A rule definition cannot be turned into a validator.
    #[error("Invalid rule for column '{column}': {message}")]
    InvalidRule { column: String, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;

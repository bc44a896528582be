//! Main Assay struct and file-level API.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::input::{DataTable, Loader, LoaderConfig, SourceMetadata};
use crate::schema::{Schema, SchemaDefinition};
use crate::validation::ValidationError;

/// Configuration for file-level checks.
#[derive(Debug, Clone, Default)]
pub struct AssayConfig {
    /// Loader configuration.
    pub loader: LoaderConfig,
}

/// Outcome of checking one data file against a schema.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Metadata about the data file.
    pub source: SourceMetadata,
    /// Number of columns declared by the schema.
    pub schema_columns: usize,
    /// Whether the data satisfied the schema.
    pub passed: bool,
    /// The failure, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
    /// Human-readable rendering of the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loads data files and checks them against schemas.
pub struct Assay {
    loader: Loader,
}

impl Assay {
    /// Create an instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(AssayConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: AssayConfig) -> Self {
        Self {
            loader: Loader::with_config(config.loader),
        }
    }

    /// Load a data file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        self.loader.load_file(path)
    }

    /// Check a data file against a JSON schema definition file.
    ///
    /// IO, parse and schema construction problems are errors; a dataset that violates the
    /// schema still yields a report.
    pub fn check_file(
        &self,
        data_path: impl AsRef<Path>,
        schema_path: impl AsRef<Path>,
    ) -> Result<CheckReport> {
        let schema = SchemaDefinition::load(schema_path)?.build()?;
        let (table, source) = self.load(data_path)?;
        Ok(self.check(&table, source, &schema))
    }

    /// Check a loaded table against a schema.
    pub fn check(&self, table: &DataTable, source: SourceMetadata, schema: &Schema) -> CheckReport {
        let outcome = schema.validate(table);

        match &outcome {
            Ok(()) => info!(file = %source.file, "dataset satisfies schema"),
            Err(e) => debug!(file = %source.file, error = %e, "dataset violates schema"),
        }

        let error = outcome.err();
        CheckReport {
            source,
            schema_columns: schema.len(),
            passed: error.is_none(),
            message: error.as_ref().map(ToString::to_string),
            error,
        }
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}

//! Schema definition and evaluation.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use tracing::debug;

use super::column::{ColumnDescriptor, Presence};
use crate::error::{AssayError, Result};
use crate::input::Dataset;
use crate::validation::{All, ValidationError, ValidationResult, Validator};

/// Expected shape of a dataset: column descriptors mapped to the validators their data must
/// pass.
///
/// A schema is immutable once built and can validate any number of datasets, from any
/// number of threads.
#[derive(Debug, Default)]
pub struct Schema {
    rules: IndexMap<ColumnDescriptor, All>,
}

impl Schema {
    /// Create a schema from descriptors and their validator lists, in declaration order.
    ///
    /// Fails when two descriptors refer to the same column name.
    pub fn new<I>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ColumnDescriptor, Vec<Box<dyn Validator>>)>,
    {
        let mut seen = HashSet::new();
        let mut map = IndexMap::new();

        for (descriptor, validators) in rules {
            if !seen.insert(descriptor.name().to_string()) {
                return Err(AssayError::DuplicateColumn(descriptor.name().to_string()));
            }
            map.insert(descriptor, All::new(validators));
        }

        Ok(Self { rules: map })
    }

    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Validate a dataset, returning the first failure.
    ///
    /// Required columns are checked for presence first. Then every required column, and
    /// every optional column that is present, runs through its validators in declaration
    /// order.
    pub fn validate<D: Dataset + ?Sized>(&self, data: &D) -> ValidationResult {
        debug!(columns = self.rules.len(), "validating dataset against schema");

        self.check_column_presence(data)?;

        for (descriptor, validators) in &self.rules {
            let column = match (descriptor.presence(), data.column(descriptor.name())) {
                (_, Some(column)) => column,
                (Presence::Optional, None) => {
                    debug!(column = descriptor.name(), "optional column absent, skipping");
                    continue;
                }
                (Presence::Required, None) => {
                    return Err(ValidationError::MissingColumn {
                        columns: BTreeSet::from([descriptor.name().to_string()]),
                    });
                }
            };

            if let Err(e) = validators.validate(column) {
                debug!(column = descriptor.name(), kind = e.kind(), "column failed validation");
                return Err(e);
            }
        }

        Ok(())
    }

    /// Fail with the set of required columns the dataset lacks.
    pub fn check_column_presence<D: Dataset + ?Sized>(&self, data: &D) -> ValidationResult {
        let present: HashSet<&str> = data.column_names().into_iter().collect();
        let missing: BTreeSet<String> = self
            .column_names(Presence::Required)
            .into_iter()
            .filter(|name| !present.contains(name.as_str()))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            debug!(missing = ?missing, "required columns missing");
            Err(ValidationError::MissingColumn { columns: missing })
        }
    }

    /// Names of the columns declared with the given presence.
    pub fn column_names(&self, presence: Presence) -> BTreeSet<String> {
        self.rules
            .keys()
            .filter(|d| d.presence() == presence)
            .map(|d| d.name().to_string())
            .collect()
    }

    /// Names of the required columns.
    pub fn required_column_names(&self) -> BTreeSet<String> {
        self.column_names(Presence::Required)
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.rules.keys()
    }

    /// Validators attached to a descriptor.
    pub fn rules_for(&self, descriptor: &ColumnDescriptor) -> Option<&All> {
        self.rules.get(descriptor)
    }

    pub fn contains(&self, descriptor: &ColumnDescriptor) -> bool {
        self.rules.contains_key(descriptor)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Incremental construction of a [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    rules: Vec<(ColumnDescriptor, Vec<Box<dyn Validator>>)>,
}

impl SchemaBuilder {
    /// Add a column with its validators.
    pub fn column(mut self, descriptor: ColumnDescriptor, validators: Vec<Box<dyn Validator>>) -> Self {
        self.rules.push((descriptor, validators));
        self
    }

    /// Add a required column.
    pub fn required(self, name: impl Into<String>, validators: Vec<Box<dyn Validator>>) -> Self {
        self.column(ColumnDescriptor::required(name), validators)
    }

    /// Add an optional column.
    pub fn optional(self, name: impl Into<String>, validators: Vec<Box<dyn Validator>>) -> Self {
        self.column(ColumnDescriptor::optional(name), validators)
    }

    /// Finish the schema, rejecting duplicate column names.
    pub fn build(self) -> Result<Schema> {
        Schema::new(self.rules)
    }
}

//! Validation failure taxonomy.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::input::{Value, ValueType};

/// Which side of a bounded constraint was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Minimum,
    Maximum,
}

impl Bound {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Bound::Minimum => "minimum",
            Bound::Maximum => "maximum",
        }
    }

    fn comparison(&self) -> &'static str {
        match self {
            Bound::Minimum => "smaller",
            Bound::Maximum => "larger",
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a dataset failed validation.
///
/// [`ValidationError::MissingColumn`] is the only structural failure; every other variant
/// describes invalid data in a present column.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Required columns absent from the dataset.
    #[error("Columns missing: {}", join_names(.columns))]
    MissingColumn { columns: BTreeSet<String> },

    /// A cell's runtime type differs from the expected type.
    #[error("Invalid data type found for column: {column}. Required type: {expected}")]
    InvalidType { column: String, expected: ValueType },

    /// A numeric cell lies outside the configured range.
    #[error(
        "Value found {} than enforced {bound} for column: {column}. Required {bound}: {limit}",
        .bound.comparison()
    )]
    OutOfRange {
        column: String,
        bound: Bound,
        limit: f64,
    },

    /// A cell's length lies outside the configured range.
    #[error(
        "Value found with length {} than enforced {bound} length for column: {column}. \
         Required {bound} length: {limit}",
        .bound.comparison()
    )]
    InvalidLength {
        column: String,
        bound: Bound,
        limit: usize,
    },

    /// A cell is not one of the allowed values.
    #[error("Value found outside of defined set for column: {column}. Allowed: {}", join_values(.allowed))]
    NotInSet { column: String, allowed: Vec<Value> },

    /// Datetime values carry no timezone offset.
    #[error("Non-timezone-aware dates found for column: {column}.")]
    MissingTimezone { column: String },

    /// Every alternative of a disjunctive group failed.
    #[error("No alternative passed for column: {column}.{}", format_alternatives(.errors))]
    GroupFailure {
        column: String,
        errors: Vec<ValidationError>,
    },
}

impl ValidationError {
    pub fn is_missing_column(&self) -> bool {
        matches!(self, ValidationError::MissingColumn { .. })
    }

    /// True for every failure caused by the contents of a present column.
    pub fn is_invalid_data(&self) -> bool {
        !self.is_missing_column()
    }

    /// The column the failure refers to. `None` for missing columns.
    pub fn column(&self) -> Option<&str> {
        match self {
            ValidationError::MissingColumn { .. } => None,
            ValidationError::InvalidType { column, .. }
            | ValidationError::OutOfRange { column, .. }
            | ValidationError::InvalidLength { column, .. }
            | ValidationError::NotInSet { column, .. }
            | ValidationError::MissingTimezone { column }
            | ValidationError::GroupFailure { column, .. } => Some(column),
        }
    }

    /// Short machine-friendly name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingColumn { .. } => "missing_column",
            ValidationError::InvalidType { .. } => "invalid_type",
            ValidationError::OutOfRange { .. } => "out_of_range",
            ValidationError::InvalidLength { .. } => "invalid_length",
            ValidationError::NotInSet { .. } => "not_in_set",
            ValidationError::MissingTimezone { .. } => "missing_timezone",
            ValidationError::GroupFailure { .. } => "group_failure",
        }
    }
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn join_values(values: &[Value]) -> String {
    let rendered: Vec<String> = values.iter().map(Value::to_string).collect();
    format!("{{{}}}", rendered.join(", "))
}

fn format_alternatives(errors: &[ValidationError]) -> String {
    if errors.is_empty() {
        return " The group has no alternatives.".to_string();
    }
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!(" [{}] {}", i + 1, e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_messages() {
        let err = ValidationError::OutOfRange {
            column: "baz".to_string(),
            bound: Bound::Minimum,
            limit: 8.0,
        };
        assert_eq!(
            err.to_string(),
            "Value found smaller than enforced minimum for column: baz. Required minimum: 8"
        );

        let err = ValidationError::OutOfRange {
            column: "baz".to_string(),
            bound: Bound::Maximum,
            limit: 2.5,
        };
        assert_eq!(
            err.to_string(),
            "Value found larger than enforced maximum for column: baz. Required maximum: 2.5"
        );
    }

    #[test]
    fn test_missing_column_message_is_sorted() {
        let err = ValidationError::MissingColumn {
            columns: ["qux", "baz"].into_iter().map(String::from).collect(),
        };
        assert_eq!(err.to_string(), "Columns missing: baz, qux");
        assert!(err.is_missing_column());
        assert_eq!(err.column(), None);
    }

    #[test]
    fn test_type_and_set_messages() {
        let err = ValidationError::InvalidType {
            column: "foo".to_string(),
            expected: ValueType::String,
        };
        assert_eq!(
            err.to_string(),
            "Invalid data type found for column: foo. Required type: string"
        );
        assert!(err.is_invalid_data());

        let err = ValidationError::NotInSet {
            column: "tag".to_string(),
            allowed: vec!["a".into(), 1i64.into()],
        };
        assert_eq!(
            err.to_string(),
            "Value found outside of defined set for column: tag. Allowed: {\"a\", 1}"
        );
    }

    #[test]
    fn test_group_failure_message_lists_alternatives() {
        let err = ValidationError::GroupFailure {
            column: "x".to_string(),
            errors: vec![ValidationError::MissingTimezone {
                column: "x".to_string(),
            }],
        };
        assert_eq!(
            err.to_string(),
            "No alternative passed for column: x. [1] Non-timezone-aware dates found for column: x."
        );

        let empty = ValidationError::GroupFailure {
            column: "x".to_string(),
            errors: Vec::new(),
        };
        assert!(empty.to_string().ends_with("The group has no alternatives."));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let err = ValidationError::MissingTimezone {
            column: "ts".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "missing_timezone");
        assert_eq!(json["column"], "ts");
    }
}

//! Declarative schema definitions loaded from JSON.
//!
//! ```json
//! {
//!   "columns": [
//!     { "name": "age", "rules": [ { "type": "type", "expected": "integer" },
//!                                 { "type": "range", "min": 0, "max": 130 } ] },
//!     { "name": "nickname", "required": false,
//!       "rules": [ { "type": "length", "max": 20 } ] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::column::{ColumnDescriptor, Presence};
use super::table::Schema;
use crate::error::{AssayError, Result};
use crate::input::{Value, ValueType};
use crate::validation::{
    All, Any, RangeValidator, SetMemberValidator, TimezoneValidator, TypeValidator, Validator,
    ValueLengthValidator,
};

/// Serializable description of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub columns: Vec<ColumnDefinition>,
}

/// One column of a [`SchemaDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    /// Defaults to required.
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleDefinition>,
}

fn default_required() -> bool {
    true
}

/// Serializable description of a validator tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleDefinition {
    /// Exact runtime type.
    Type { expected: ValueType },
    /// Numeric bounds.
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Length bounds.
    Length {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
    /// Allowed values.
    SetMember { values: Vec<Value> },
    /// Timezone-aware datetimes.
    Timezone,
    /// Every nested rule must pass.
    All { rules: Vec<RuleDefinition> },
    /// At least one nested rule must pass.
    Any { rules: Vec<RuleDefinition> },
}

impl RuleDefinition {
    /// Build the validator described by this rule. `column` is only used for error reporting.
    pub fn compile(&self, column: &str) -> Result<Box<dyn Validator>> {
        let invalid = |message: String| AssayError::InvalidRule {
            column: column.to_string(),
            message,
        };

        let validator: Box<dyn Validator> = match self {
            RuleDefinition::Type { expected } => Box::new(TypeValidator::new(*expected)),
            RuleDefinition::Range { min, max } => {
                if let (Some(lo), Some(hi)) = (min, max) {
                    if lo > hi {
                        return Err(invalid(format!("range minimum {} exceeds maximum {}", lo, hi)));
                    }
                }
                let mut range = RangeValidator::new();
                if let Some(lo) = min {
                    range = range.with_min(*lo);
                }
                if let Some(hi) = max {
                    range = range.with_max(*hi);
                }
                Box::new(range)
            }
            RuleDefinition::Length { min, max } => {
                if let (Some(lo), Some(hi)) = (min, max) {
                    if lo > hi {
                        return Err(invalid(format!(
                            "length minimum {} exceeds maximum {}",
                            lo, hi
                        )));
                    }
                }
                let mut length = ValueLengthValidator::new();
                if let Some(lo) = min {
                    length = length.with_min_length(*lo);
                }
                if let Some(hi) = max {
                    length = length.with_max_length(*hi);
                }
                Box::new(length)
            }
            RuleDefinition::SetMember { values } => {
                Box::new(SetMemberValidator::new(values.iter().cloned()))
            }
            RuleDefinition::Timezone => Box::new(TimezoneValidator),
            RuleDefinition::All { rules } => Box::new(All::new(compile_all(rules, column)?)),
            RuleDefinition::Any { rules } => Box::new(Any::new(compile_all(rules, column)?)),
        };

        Ok(validator)
    }
}

fn compile_all(rules: &[RuleDefinition], column: &str) -> Result<Vec<Box<dyn Validator>>> {
    rules.iter().map(|rule| rule.compile(column)).collect()
}

impl ColumnDefinition {
    pub fn descriptor(&self) -> ColumnDescriptor {
        let presence = if self.required {
            Presence::Required
        } else {
            Presence::Optional
        };
        ColumnDescriptor::new(self.name.clone(), presence)
    }
}

impl SchemaDefinition {
    /// Parse a definition from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a definition from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Compile the definition into a [`Schema`].
    pub fn build(&self) -> Result<Schema> {
        let rules = self
            .columns
            .iter()
            .map(|c| -> Result<_> { Ok((c.descriptor(), compile_all(&c.rules, &c.name)?)) })
            .collect::<Result<Vec<_>>>()?;
        Schema::new(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, DataTable};
    use crate::validation::ValidationError;

    const PEOPLE: &str = r#"{
        "columns": [
            { "name": "age", "rules": [
                { "type": "type", "expected": "integer" },
                { "type": "range", "min": 0, "max": 130 }
            ] },
            { "name": "status", "rules": [
                { "type": "set_member", "values": ["active", "inactive"] }
            ] },
            { "name": "nickname", "required": false, "rules": [
                { "type": "any", "rules": [
                    { "type": "type", "expected": "null" },
                    { "type": "length", "min": 1, "max": 3 }
                ] }
            ] },
            { "name": "seen_at", "required": false, "rules": [ { "type": "timezone" } ] }
        ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let definition = SchemaDefinition::from_json(PEOPLE).unwrap();
        assert_eq!(definition.columns.len(), 4);
        assert!(definition.columns[0].required);
        assert!(!definition.columns[2].required);

        let schema = definition.build().unwrap();
        assert_eq!(schema.len(), 4);
        assert!(schema.contains(&ColumnDescriptor::optional("nickname")));
    }

    #[test]
    fn test_built_schema_validates() {
        let schema = SchemaDefinition::from_json(PEOPLE).unwrap().build().unwrap();

        let mixed = DataTable::from_columns(vec![
            Column::new("age", vec![30i64.into(), 41i64.into()]),
            Column::new("status", vec!["active".into(), "inactive".into()]),
            Column::new("nickname", vec!["Al".into(), Value::Null]),
        ]);
        // Each alternative fails on one of the two rows, so the group fails.
        let err = schema.validate(&mixed).unwrap_err();
        assert!(matches!(err, ValidationError::GroupFailure { ref errors, .. } if errors.len() == 2));

        let good = DataTable::from_columns(vec![
            Column::new("age", vec![30i64.into()]),
            Column::new("status", vec!["active".into()]),
            Column::new("nickname", vec!["Al".into()]),
        ]);
        assert!(schema.validate(&good).is_ok());

        let bad_status = DataTable::from_columns(vec![
            Column::new("age", vec![30i64.into()]),
            Column::new("status", vec!["retired".into()]),
        ]);
        assert!(matches!(
            schema.validate(&bad_status).unwrap_err(),
            ValidationError::NotInSet { .. }
        ));
    }

    #[test]
    fn test_contradictory_bounds_rejected() {
        let json = r#"{ "columns": [ { "name": "x", "rules": [
            { "type": "all", "rules": [ { "type": "range", "min": 5, "max": 1 } ] }
        ] } ] }"#;
        let err = SchemaDefinition::from_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, AssayError::InvalidRule { ref column, .. } if column == "x"));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let json = r#"{ "columns": [ { "name": "x" }, { "name": "x", "required": false } ] }"#;
        let err = SchemaDefinition::from_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, AssayError::DuplicateColumn(_)));
    }

    #[test]
    fn test_unknown_rule_type_is_json_error() {
        let json = r#"{ "columns": [ { "name": "x", "rules": [ { "type": "regex" } ] } ] }"#;
        assert!(matches!(
            SchemaDefinition::from_json(json).unwrap_err(),
            AssayError::Json(_)
        ));
    }

    #[test]
    fn test_round_trip_keeps_rules() {
        let definition = SchemaDefinition::from_json(PEOPLE).unwrap();
        let json = serde_json::to_string(&definition).unwrap();
        assert_eq!(SchemaDefinition::from_json(&json).unwrap(), definition);
    }
}

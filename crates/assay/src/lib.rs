//! Assay: declarative schema validation for columnar datasets.
//!
//! A schema maps column descriptors (required or optional) to validator lists. Validating a
//! dataset checks that every required column is present, then runs each applicable column
//! through its validators and reports the first violation.
//!
//! # Example
//!
//! ```
//! use assay::{Column, ColumnDescriptor, DataTable, RangeValidator, Schema, TypeValidator, ValueType};
//!
//! let schema = Schema::builder()
//!     .required("age", vec![
//!         Box::new(TypeValidator::new(ValueType::Integer)),
//!         Box::new(RangeValidator::new().with_min(0.0).with_max(130.0)),
//!     ])
//!     .optional("nickname", vec![])
//!     .build()
//!     .unwrap();
//!
//! let table = DataTable::from_columns(vec![Column::new("age", vec![25i64.into(), 41i64.into()])]);
//! assert!(schema.validate(&table).is_ok());
//! assert!(schema.contains(&ColumnDescriptor::required("age")));
//! ```

pub mod error;
pub mod input;
pub mod schema;
pub mod validation;

mod assay;

pub use crate::assay::{Assay, AssayConfig, CheckReport};
pub use error::{AssayError, Result};
pub use input::{Column, DataTable, Dataset, Loader, LoaderConfig, SourceMetadata, Value, ValueType};
pub use schema::{
    ColumnDefinition, ColumnDescriptor, Presence, RuleDefinition, Schema, SchemaBuilder,
    SchemaDefinition,
};
pub use validation::{
    All, Any, Bound, RangeValidator, SetMemberValidator, TimezoneValidator, TypeValidator,
    ValidationError, ValidationResult, Validator, ValueLengthValidator,
};

//! Validation engine: atomic validators, group combinators and the failure taxonomy.

mod error;
mod group;
mod validators;

pub use error::{Bound, ValidationError};
pub use group::{All, Any};
pub use validators::{
    RangeValidator, SetMemberValidator, TimezoneValidator, TypeValidator, ValidationResult,
    Validator, ValueLengthValidator,
};

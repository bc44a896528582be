//! Atomic validators: single rule checks against one column.

use std::cmp::Ordering;
use std::fmt;

use crate::input::{Column, Value, ValueType};

use super::error::{Bound, ValidationError};

/// Result of running a validator.
pub type ValidationResult = std::result::Result<(), ValidationError>;

/// A rule that a column must satisfy.
///
/// Implementations hold only their configuration and must not mutate the column, so one
/// instance can be shared across threads and reused across datasets.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Check the whole column, failing with the first violated constraint.
    fn validate(&self, column: &Column) -> ValidationResult;
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, column: &Column) -> ValidationResult {
        (**self).validate(column)
    }
}

/// Checks that every value has exactly the expected runtime type.
///
/// Matching is exact: a boolean is not accepted as an integer and an integer is not accepted
/// as a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeValidator {
    expected: ValueType,
}

impl TypeValidator {
    pub fn new(expected: ValueType) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> ValueType {
        self.expected
    }
}

impl Validator for TypeValidator {
    fn validate(&self, column: &Column) -> ValidationResult {
        if column.values().iter().all(|v| v.value_type() == self.expected) {
            Ok(())
        } else {
            Err(ValidationError::InvalidType {
                column: column.name().to_string(),
                expected: self.expected,
            })
        }
    }
}

/// Checks that numeric values lie within `[min, max]`.
///
/// Both bounds are optional and enforced independently, minimum first. Non-numeric values
/// fall outside any configured bound.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
}

impl RangeValidator {
    /// Create a validator with no bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with both bounds.
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    fn check(&self, column: &Column, bound: Bound, limit: f64) -> ValidationResult {
        let within = |v: &Value| match (bound, v.cmp_bound(limit)) {
            (Bound::Minimum, Some(Ordering::Greater | Ordering::Equal)) => true,
            (Bound::Maximum, Some(Ordering::Less | Ordering::Equal)) => true,
            _ => false,
        };

        if column.values().iter().all(within) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                column: column.name().to_string(),
                bound,
                limit,
            })
        }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, column: &Column) -> ValidationResult {
        if let Some(min) = self.min {
            self.check(column, Bound::Minimum, min)?;
        }
        if let Some(max) = self.max {
            self.check(column, Bound::Maximum, max)?;
        }
        Ok(())
    }
}

/// Checks that the length of every value lies within `[min_length, max_length]`.
///
/// Strings are measured in characters and lists in elements. Values without a length fall
/// outside any configured bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueLengthValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl ValueLengthValidator {
    /// Create a validator with no bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with both bounds.
    pub fn between(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length: Some(min_length),
            max_length: Some(max_length),
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    fn check(&self, column: &Column, bound: Bound, limit: usize) -> ValidationResult {
        let within = |v: &Value| {
            v.length().is_some_and(|len| match bound {
                Bound::Minimum => len >= limit,
                Bound::Maximum => len <= limit,
            })
        };

        if column.values().iter().all(within) {
            Ok(())
        } else {
            Err(ValidationError::InvalidLength {
                column: column.name().to_string(),
                bound,
                limit,
            })
        }
    }
}

impl Validator for ValueLengthValidator {
    fn validate(&self, column: &Column) -> ValidationResult {
        if let Some(min) = self.min_length {
            self.check(column, Bound::Minimum, min)?;
        }
        if let Some(max) = self.max_length {
            self.check(column, Bound::Maximum, max)?;
        }
        Ok(())
    }
}

/// Checks that every value is one of an allowed set.
#[derive(Debug, Clone, PartialEq)]
pub struct SetMemberValidator {
    allowed: Vec<Value>,
}

impl SetMemberValidator {
    /// Create a validator from the allowed values. Duplicates are dropped, order is kept.
    pub fn new<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for value in allowed.into_iter().map(Into::into) {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Self { allowed: unique }
    }

    pub fn allowed(&self) -> &[Value] {
        &self.allowed
    }
}

impl Validator for SetMemberValidator {
    fn validate(&self, column: &Column) -> ValidationResult {
        if column.values().iter().all(|v| self.allowed.contains(v)) {
            Ok(())
        } else {
            Err(ValidationError::NotInSet {
                column: column.name().to_string(),
                allowed: self.allowed.clone(),
            })
        }
    }
}

/// Checks that a datetime column carries timezone offsets.
///
/// Values may carry different offsets (a zone crossing daylight saving time) and nulls are
/// ignored; any naive datetime fails the column.
///
/// The column type is not checked here; pair with a [`TypeValidator`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimezoneValidator;

impl TimezoneValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for TimezoneValidator {
    fn validate(&self, column: &Column) -> ValidationResult {
        if column.is_timezone_aware() {
            Ok(())
        } else {
            Err(ValidationError::MissingTimezone {
                column: column.name().to_string(),
            })
        }
    }
}

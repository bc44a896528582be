//! Group validators combining child validators with boolean logic.

use tracing::trace;

use crate::input::Column;

use super::error::ValidationError;
use super::validators::{ValidationResult, Validator};

/// Conjunctive group: passes when every child passes.
///
/// Children run in declaration order and the first failure is returned unchanged; later
/// children are not run. An empty group passes.
#[derive(Debug, Default)]
pub struct All {
    validators: Vec<Box<dyn Validator>>,
}

impl All {
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        Self { validators }
    }

    /// Append a child validator.
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn validators(&self) -> &[Box<dyn Validator>] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for All {
    fn validate(&self, column: &Column) -> ValidationResult {
        for validator in &self.validators {
            validator.validate(column)?;
        }
        Ok(())
    }
}

/// Disjunctive group: passes as soon as one child passes.
///
/// Children after the first passing one are not run. When every child fails, all of their
/// errors are returned in declaration order inside [`ValidationError::GroupFailure`]. An empty
/// group fails with no collected errors.
#[derive(Debug, Default)]
pub struct Any {
    validators: Vec<Box<dyn Validator>>,
}

impl Any {
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        Self { validators }
    }

    /// Append a child validator.
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn validators(&self) -> &[Box<dyn Validator>] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for Any {
    fn validate(&self, column: &Column) -> ValidationResult {
        let mut errors = Vec::with_capacity(self.validators.len());

        for (index, validator) in self.validators.iter().enumerate() {
            match validator.validate(column) {
                Ok(()) => {
                    trace!(column = column.name(), alternative = index, "alternative passed");
                    return Ok(());
                }
                Err(e) => errors.push(e),
            }
        }

        Err(ValidationError::GroupFailure {
            column: column.name().to_string(),
            errors,
        })
    }
}

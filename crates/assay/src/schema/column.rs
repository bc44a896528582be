//! Column descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a column has to be present in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// The column must be present; its absence fails validation.
    Required,
    /// The column is validated only when present.
    Optional,
}

/// Names a dataset column and tags it as required or optional.
///
/// Equality and hashing cover both the name and the presence, so descriptors can key a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    name: String,
    presence: Presence,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, presence: Presence) -> Self {
        Self {
            name: name.into(),
            presence,
        }
    }

    /// Descriptor for a column that must be present.
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, Presence::Required)
    }

    /// Descriptor for a column that is checked only when present.
    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(name, Presence::Optional)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_optional(&self) -> bool {
        self.presence == Presence::Optional
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.presence {
            Presence::Required => write!(f, "Required({:?})", self.name),
            Presence::Optional => write!(f, "Optional({:?})", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_presence_queries() {
        let foo = ColumnDescriptor::required("foo");
        assert!(foo.is_required());
        assert!(!foo.is_optional());
        assert!(ColumnDescriptor::optional("foo").is_optional());
    }

    #[test]
    fn test_identity_includes_presence() {
        let mut keys = HashSet::new();
        keys.insert(ColumnDescriptor::required("foo"));
        keys.insert(ColumnDescriptor::required("foo"));
        keys.insert(ColumnDescriptor::optional("foo"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(ColumnDescriptor::optional("bar").to_string(), "Optional(\"bar\")");
    }
}

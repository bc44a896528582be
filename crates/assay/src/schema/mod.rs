//! Schema model: column descriptors, schemas and their declarative definitions.

mod column;
mod definition;
mod table;

pub use column::{ColumnDescriptor, Presence};
pub use definition::{ColumnDefinition, RuleDefinition, SchemaDefinition};
pub use table::{Schema, SchemaBuilder};

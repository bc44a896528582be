//! Columnar data model and file loading.

mod loader;
mod source;
mod value;

pub use loader::{is_null_token, parse_cell, Loader, LoaderConfig};
pub use source::{Column, DataTable, Dataset, SourceMetadata};
pub use value::{Value, ValueType};

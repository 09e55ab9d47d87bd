//! Domain model types (pure).
//!
//! Rows, row identity, column descriptors and error types.

pub mod column;
pub mod error;
pub mod row;

// Re-export for convenience
pub use column::{find_column, ColumnDescriptor, RenderFn};
pub use error::{AppError, Feature, InputError, TableError};
pub use row::{coerce_cell, KeyExtractor, KeyFn, Row, RowKey};

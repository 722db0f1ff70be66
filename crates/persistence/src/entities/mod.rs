//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod todo;

pub use todo::TodoEntity;

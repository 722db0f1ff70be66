//! Session-scoped database operations.

pub mod todo;

pub use todo::TodoSession;

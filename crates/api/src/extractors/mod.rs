//! Custom Axum extractors.
//!
//! Extractors for parsing and validating request data.

pub mod todo_id;
pub mod validated_json;

pub use todo_id::TodoId;
pub use validated_json::ValidatedJson;

//! Persistence layer for the todo backend.
//!
//! This crate contains:
//! - Database connection management and schema initialization
//! - Entity definitions (database row mappings)
//! - The store gateway and its request-scoped sessions

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod schema;
pub mod store;

pub use store::TodoStore;

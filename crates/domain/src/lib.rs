//! Domain layer for the todo backend.
//!
//! This crate contains:
//! - The `Todo` model
//! - Request/response contracts and the partial-update merge

pub mod models;

//! Table layout for the todo store.

/// Name of the table holding todo items.
pub const TODOS_TABLE: &str = "todos";

/// Creates the todos table when it does not exist yet.
pub const CREATE_TODOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0
)
"#;

//! Todo domain model and request/response contracts.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Represents a todo item in the system.
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// Mutable fields of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TodoField {
    Title,
    Completed,
}

impl TodoField {
    /// Column / JSON name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoField::Title => "title",
            TodoField::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TodoField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Todo {
    /// Merges a partial update into this todo.
    ///
    /// Only fields present in `changes` overwrite; the rest pass through untouched.
    pub fn apply(&mut self, changes: UpdateTodoRequest) {
        let UpdateTodoRequest { title, completed } = changes;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
    }
}

/// Values for a todo that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a todo.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    #[serde(default)]
    pub completed: bool,
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(request: CreateTodoRequest) -> Self {
        Self {
            title: request.title,
            completed: request.completed,
        }
    }
}

/// Request payload for updating a todo (partial update).
///
/// A field left out of the body stays `None` and is not applied. An explicit
/// `null` is rejected at deserialization since neither column is nullable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[serde(default, deserialize_with = "present")]
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    /// The set of fields explicitly present in the request body.
    pub fn fields(&self) -> BTreeSet<TodoField> {
        let mut fields = BTreeSet::new();
        if self.title.is_some() {
            fields.insert(TodoField::Title);
        }
        if self.completed.is_some() {
            fields.insert(TodoField::Completed);
        }
        fields
    }
}

/// Deserializes a field that was present in the body, refusing `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Response payload for todo operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            completed: todo.completed,
        }
    }
}

/// Confirmation returned after a todo is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTodoResponse {
    pub deleted: bool,
}

impl DeleteTodoResponse {
    pub fn deleted() -> Self {
        Self { deleted: true }
    }
}

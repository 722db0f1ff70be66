//! Todo entity (database row mapping).

use sqlx::FromRow;

use domain::models::Todo;

/// Database row mapping for the todos table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TodoEntity {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl From<TodoEntity> for Todo {
    fn from(entity: TodoEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            completed: entity.completed,
        }
    }
}

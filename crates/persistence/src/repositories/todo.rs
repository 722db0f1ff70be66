//! Todo operations bound to a single transaction.

use sqlx::{Sqlite, Transaction};

use domain::models::{NewTodo, Todo};

use crate::entities::TodoEntity;
use crate::metrics::QueryTimer;

/// A request-scoped session over the todos table.
///
/// Wraps one transaction. Call [`TodoSession::commit`] to persist; dropping
/// the session without committing rolls back and hands the connection back
/// to the pool.
pub struct TodoSession {
    tx: Transaction<'static, Sqlite>,
}

impl TodoSession {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// Takes the write lock for the rest of the session.
    ///
    /// The pool only issues a deferred `BEGIN`, so an empty write stands in
    /// for `BEGIN IMMEDIATE`. It touches no rows.
    pub(crate) async fn lock(&mut self) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("lock_todos");
        let result = sqlx::query(
            r#"
            DELETE FROM todos WHERE 0
            "#,
        )
        .execute(&mut *self.tx)
        .await;
        timer.record();
        result.map(|_| ())
    }

    /// All todos, oldest first.
    pub async fn list(&mut self) -> Result<Vec<TodoEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_todos");
        let result = sqlx::query_as::<_, TodoEntity>(
            r#"
            SELECT id, title, completed FROM todos ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await;
        timer.record();
        result
    }

    /// Inserts a todo. The store assigns `id`.
    pub async fn insert(&mut self, todo: &NewTodo) -> Result<TodoEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_todo");
        let result = sqlx::query_as::<_, TodoEntity>(
            r#"
            INSERT INTO todos (title, completed)
            VALUES (?1, ?2)
            RETURNING id, title, completed
            "#,
        )
        .bind(&todo.title)
        .bind(todo.completed)
        .fetch_one(&mut *self.tx)
        .await;
        timer.record();
        result
    }

    /// Find a todo by id.
    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<TodoEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_todo_by_id");
        let result = sqlx::query_as::<_, TodoEntity>(
            r#"
            SELECT id, title, completed FROM todos WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await;
        timer.record();
        result
    }

    /// Writes the mutable fields of `todo` back to its row.
    ///
    /// Fails with [`sqlx::Error::RowNotFound`] if the row is gone.
    pub async fn update(&mut self, todo: &Todo) -> Result<TodoEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_todo");
        let result = sqlx::query_as::<_, TodoEntity>(
            r#"
            UPDATE todos SET
                title = ?2,
                completed = ?3
            WHERE id = ?1
            RETURNING id, title, completed
            "#,
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(todo.completed)
        .fetch_one(&mut *self.tx)
        .await;
        timer.record();
        result
    }

    /// Deletes the row for `id`.
    ///
    /// Fails with [`sqlx::Error::RowNotFound`] if there is no such row.
    pub async fn delete(&mut self, id: i64) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("delete_todo");
        let result = sqlx::query(
            r#"
            DELETE FROM todos WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *self.tx)
        .await;
        timer.record();
        match result?.rows_affected() {
            0 => Err(sqlx::Error::RowNotFound),
            _ => Ok(()),
        }
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}

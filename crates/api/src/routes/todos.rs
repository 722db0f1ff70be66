//! Todo endpoint handlers.
//!
//! Each handler opens one store session, commits it on success, and lets it
//! roll back on drop when any step fails. Handlers that look a todo up before
//! changing it open a write session so concurrent writers queue instead of
//! failing.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{TodoId, ValidatedJson};
use crate::middleware::metrics::{record_todo_created, record_todo_deleted, record_todo_updated};
use domain::models::{
    CreateTodoRequest, DeleteTodoResponse, NewTodo, Todo, TodoField, TodoResponse,
    UpdateTodoRequest,
};

fn todo_not_found() -> ApiError {
    ApiError::NotFound("Todo not found".to_string())
}

/// List all todos.
///
/// GET /todos
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let mut session = state.store.begin().await?;
    let entities = session.list().await?;
    session.commit().await?;

    let todos: Vec<TodoResponse> = entities
        .into_iter()
        .map(|e| {
            let todo: Todo = e.into();
            todo.into()
        })
        .collect();

    Ok(Json(todos))
}

/// Create a new todo.
///
/// POST /todos
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let new_todo: NewTodo = request.into();

    let mut session = state.store.begin().await?;
    let entity = session.insert(&new_todo).await?;
    session.commit().await?;

    let todo: Todo = entity.into();
    record_todo_created();
    info!(todo_id = todo.id, "Todo created");

    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// Update a todo (partial update).
///
/// PATCH /todos/:id
pub async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    ValidatedJson(request): ValidatedJson<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, ApiError> {
    let changed: Vec<&str> = request.fields().iter().map(TodoField::as_str).collect();

    let mut session = state.store.begin_write().await?;
    let mut todo: Todo = session
        .find_by_id(id)
        .await?
        .ok_or_else(todo_not_found)?
        .into();

    todo.apply(request);
    let entity = session.update(&todo).await?;
    session.commit().await?;

    record_todo_updated();
    info!(
        todo_id = id,
        fields = %changed.join(","),
        "Todo updated"
    );

    let todo: Todo = entity.into();
    Ok(Json(todo.into()))
}

/// Delete a todo.
///
/// DELETE /todos/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<DeleteTodoResponse>, ApiError> {
    let mut session = state.store.begin_write().await?;
    session.find_by_id(id).await?.ok_or_else(todo_not_found)?;
    session.delete(id).await?;
    session.commit().await?;

    record_todo_deleted();
    info!(todo_id = id, "Todo deleted");

    Ok(Json(DeleteTodoResponse::deleted()))
}

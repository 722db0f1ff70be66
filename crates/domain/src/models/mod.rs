//! Domain models for the todo backend.

pub mod todo;

pub use todo::{
    CreateTodoRequest, DeleteTodoResponse, NewTodo, Todo, TodoField, TodoResponse,
    UpdateTodoRequest,
};

//! Handlers for the todo resource.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::todo::{TodoListQuery, TodoRequest, TodoResponse, UpdateTodoRequest};
use crate::api::extract::{AuthUser, ResourceId};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's todos, newest first.
///
/// # Endpoint
///
/// `GET /api/todos/[?completed=true|false]`
pub async fn list_todos_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<TodoListQuery>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state
        .todo_service
        .list_todos(user.user_id, query.completed)
        .await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Creates a todo.
///
/// # Endpoint
///
/// `POST /api/todos/`
///
/// ```json
/// { "title": "Buy milk", "description": "2 litres", "completed": false }
/// ```
///
/// # Errors
///
/// Returns 400 if the title is missing, blank or too long.
pub async fn create_todo_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<TodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    payload.validate()?;

    let todo = state
        .todo_service
        .create_todo(
            user.user_id,
            payload.title,
            payload.description,
            payload.completed,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// Retrieves one todo.
///
/// # Endpoint
///
/// `GET /api/todos/{id}/`
pub async fn get_todo_handler(
    ResourceId(id): ResourceId,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = state.todo_service.get_todo(id, user.user_id).await?;
    Ok(Json(todo.into()))
}

/// Replaces a todo.
///
/// # Endpoint
///
/// `PUT /api/todos/{id}/`
///
/// `title` is required; omitted `description`/`completed` reset to their
/// defaults.
pub async fn replace_todo_handler(
    ResourceId(id): ResourceId,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<TodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    payload.validate()?;

    let todo = state
        .todo_service
        .replace_todo(
            id,
            user.user_id,
            payload.title,
            payload.description,
            payload.completed,
        )
        .await?;

    Ok(Json(todo.into()))
}

/// Partially updates a todo.
///
/// # Endpoint
///
/// `PATCH /api/todos/{id}/`
///
/// ```json
/// { "completed": true }
/// ```
pub async fn update_todo_handler(
    ResourceId(id): ResourceId,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    payload.validate()?;

    let todo = state
        .todo_service
        .update_todo(id, user.user_id, payload.into())
        .await?;

    Ok(Json(todo.into()))
}

/// Deletes a todo.
///
/// # Endpoint
///
/// `DELETE /api/todos/{id}/`
///
/// # Errors
///
/// Returns 404 if the todo doesn't exist or belongs to another user.
pub async fn delete_todo_handler(
    ResourceId(id): ResourceId,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    state.todo_service.delete_todo(id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

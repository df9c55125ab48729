//! PostgreSQL implementation of todo repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewTodo, Todo, TodoPatch};
use crate::domain::repositories::TodoRepository;
use crate::error::AppError;

const TODO_COLUMNS: &str = "id, owner_id, title, description, completed, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    owner_id: i64,
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(r: TodoRow) -> Self {
        Todo {
            id: r.id,
            owner_id: r.owner_id,
            title: r.title,
            description: r.description,
            completed: r.completed,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for todos.
pub struct PgTodoRepository {
    pool: Arc<PgPool>,
}

impl PgTodoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> Result<Todo, AppError> {
        let row: TodoRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO todos (owner_id, title, description, completed)
            VALUES ($1, $2, $3, $4)
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(new_todo.owner_id)
        .bind(new_todo.title)
        .bind(new_todo.description)
        .bind(new_todo.completed)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64, owner_id: i64) -> Result<Option<Todo>, AppError> {
        let row: Option<TodoRow> = sqlx::query_as(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn list(&self, owner_id: i64, completed: Option<bool>) -> Result<Vec<Todo>, AppError> {
        let rows: Vec<TodoRow> = sqlx::query_as(&format!(
            r#"
            SELECT {TODO_COLUMNS}
            FROM todos
            WHERE owner_id = $1
              AND ($2::boolean IS NULL OR completed = $2)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(owner_id)
        .bind(completed)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, AppError> {
        let row: Option<TodoRow> = sqlx::query_as(&format!(
            r#"
            UPDATE todos
            SET title       = COALESCE($3, title),
                description = COALESCE($4, description),
                completed   = COALESCE($5, completed),
                updated_at  = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.completed)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, owner_id: Option<i64>) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE ($1::bigint IS NULL OR owner_id = $1)")
                .bind(owner_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }
}

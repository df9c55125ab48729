//! PostgreSQL implementation of note repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewNote, Note};
use crate::domain::repositories::NoteRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: i64,
    author_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(r: NoteRow) -> Self {
        Note {
            id: r.id,
            author_id: r.author_id,
            title: r.title,
            content: r.content,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for notes.
pub struct PgNoteRepository {
    pool: Arc<PgPool>,
}

impl PgNoteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn create(&self, new_note: NewNote) -> Result<Note, AppError> {
        let row: NoteRow = sqlx::query_as(
            r#"
            INSERT INTO notes (author_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, title, content, created_at
            "#,
        )
        .bind(new_note.author_id)
        .bind(new_note.title)
        .bind(new_note.content)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list(&self, author_id: i64) -> Result<Vec<Note>, AppError> {
        let rows: Vec<NoteRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, title, content, created_at
            FROM notes
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn delete(&self, id: i64, author_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, author_id: Option<i64>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notes WHERE ($1::bigint IS NULL OR author_id = $1)",
        )
        .bind(author_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}

//! Repository trait for note data access.

use crate::domain::entities::{NewNote, Note};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for notes.
///
/// Notes are only ever listed, created and deleted; there is no update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Creates a new note.
    async fn create(&self, new_note: NewNote) -> Result<Note, AppError>;

    /// Lists the author's notes, newest first.
    async fn list(&self, author_id: i64) -> Result<Vec<Note>, AppError>;

    /// Deletes a note written by `author_id`.
    ///
    /// Returns `Ok(false)` if the note does not exist or belongs to someone else.
    async fn delete(&self, id: i64, author_id: i64) -> Result<bool, AppError>;

    /// Counts notes, optionally for a single author.
    async fn count(&self, author_id: Option<i64>) -> Result<i64, AppError>;
}

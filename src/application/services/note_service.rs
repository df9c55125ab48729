//! Note management service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewNote, Note};
use crate::domain::repositories::NoteRepository;
use crate::error::AppError;

/// Service for the note resource.
pub struct NoteService {
    repository: Arc<dyn NoteRepository>,
}

impl NoteService {
    /// Creates a new note service.
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        Self { repository }
    }

    /// Lists the author's notes, newest first.
    pub async fn list_notes(&self, author_id: i64) -> Result<Vec<Note>, AppError> {
        self.repository.list(author_id).await
    }

    /// Creates a note.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if title or content is blank.
    pub async fn create_note(
        &self,
        author_id: i64,
        title: String,
        content: String,
    ) -> Result<Note, AppError> {
        let title = title.trim().to_string();
        if title.is_empty() || content.trim().is_empty() {
            return Err(AppError::bad_request(
                "Validation failed",
                json!({ "reason": "Title and content must not be blank" }),
            ));
        }

        let note = self
            .repository
            .create(NewNote {
                author_id,
                title,
                content,
            })
            .await?;

        tracing::info!(note_id = note.id, author_id, "Note created");
        Ok(note)
    }

    /// Deletes a note written by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the note is missing or belongs to someone else.
    pub async fn delete_note(&self, id: i64, author_id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id, author_id).await? {
            return Err(AppError::not_found("Note not found", json!({ "id": id })));
        }

        tracing::info!(note_id = id, author_id, "Note deleted");
        Ok(())
    }

    /// Counts notes, optionally for a single author.
    pub async fn count_notes(&self, author_id: Option<i64>) -> Result<i64, AppError> {
        self.repository.count(author_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockNoteRepository;
    use chrono::Utc;

    #[tokio::test]
    async fn test_create_note_success() {
        let mut mock_repo = MockNoteRepository::new();
        mock_repo
            .expect_create()
            .withf(|n| n.author_id == 4 && n.title == "Groceries")
            .times(1)
            .returning(|n| {
                Ok(Note {
                    id: 1,
                    author_id: n.author_id,
                    title: n.title,
                    content: n.content,
                    created_at: Utc::now(),
                })
            });

        let service = NoteService::new(Arc::new(mock_repo));

        let note = service
            .create_note(4, " Groceries ".to_string(), "eggs".to_string())
            .await
            .unwrap();

        assert_eq!(note.id, 1);
        assert_eq!(note.content, "eggs");
    }

    #[tokio::test]
    async fn test_create_note_blank_content() {
        let mut mock_repo = MockNoteRepository::new();
        mock_repo.expect_create().times(0);

        let service = NoteService::new(Arc::new(mock_repo));

        let result = service
            .create_note(4, "Title".to_string(), "  ".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_note_binds_id_and_author() {
        let mut mock_repo = MockNoteRepository::new();
        mock_repo
            .expect_delete()
            .withf(|id, author| *id == 17 && *author == 4)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = NoteService::new(Arc::new(mock_repo));

        assert!(service.delete_note(17, 4).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_note_not_found() {
        let mut mock_repo = MockNoteRepository::new();
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = NoteService::new(Arc::new(mock_repo));

        let result = service.delete_note(17, 4).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}

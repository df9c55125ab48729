use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Table;
use crate::domain::entities::{NewNote, Note};
use crate::domain::repositories::NoteRepository;
use crate::error::AppError;

/// In-memory note storage.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    table: RwLock<Table<Note>>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn create(&self, new_note: NewNote) -> Result<Note, AppError> {
        let mut table = self.table.write().await;
        let note = Note {
            id: table.allocate_id(),
            author_id: new_note.author_id,
            title: new_note.title,
            content: new_note.content,
            created_at: Utc::now(),
        };
        table.rows.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list(&self, author_id: i64) -> Result<Vec<Note>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .rev()
            .filter(|n| n.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64, author_id: i64) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        let owned = table
            .rows
            .get(&id)
            .is_some_and(|n| n.author_id == author_id);
        if owned {
            table.rows.remove(&id);
        }
        Ok(owned)
    }

    async fn count(&self, author_id: Option<i64>) -> Result<i64, AppError> {
        let table = self.table.read().await;
        let count = table
            .rows
            .values()
            .filter(|n| author_id.is_none_or(|a| n.author_id == a))
            .count();
        Ok(count as i64)
    }
}

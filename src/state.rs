//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, NoteService, TodoService};
use crate::infrastructure::memory::{
    MemoryNoteRepository, MemoryTodoRepository, MemoryTokenRepository, MemoryUserRepository,
};
use crate::infrastructure::persistence::{
    PgNoteRepository, PgTodoRepository, PgTokenRepository, PgUserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub todo_service: Arc<TodoService>,
    pub note_service: Arc<NoteService>,
    pub auth_service: Arc<AuthService>,
    /// Connection pool when running on PostgreSQL; `None` for the in-memory backend.
    pub db: Option<Arc<PgPool>>,
}

impl AppState {
    /// Builds state backed by PostgreSQL repositories.
    pub fn postgres(pool: Arc<PgPool>, token_signing_secret: String) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let tokens = Arc::new(PgTokenRepository::new(pool.clone()));

        Self {
            todo_service: Arc::new(TodoService::new(Arc::new(PgTodoRepository::new(
                pool.clone(),
            )))),
            note_service: Arc::new(NoteService::new(Arc::new(PgNoteRepository::new(
                pool.clone(),
            )))),
            auth_service: Arc::new(AuthService::new(users, tokens, token_signing_secret)),
            db: Some(pool),
        }
    }

    /// Builds state backed by in-process repositories.
    ///
    /// Data is lost when the process exits.
    pub fn in_memory(token_signing_secret: String) -> Self {
        Self {
            todo_service: Arc::new(TodoService::new(Arc::new(MemoryTodoRepository::new()))),
            note_service: Arc::new(NoteService::new(Arc::new(MemoryNoteRepository::new()))),
            auth_service: Arc::new(AuthService::new(
                Arc::new(MemoryUserRepository::new()),
                Arc::new(MemoryTokenRepository::new()),
                token_signing_secret,
            )),
            db: None,
        }
    }
}

//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence` (PostgreSQL) and
//! `crate::infrastructure::memory` (in-process). Mock implementations are
//! generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`TodoRepository`] - Todo CRUD scoped to an owner
//! - [`NoteRepository`] - Note list/create/delete scoped to an author
//! - [`UserRepository`] - Account storage
//! - [`TokenRepository`] - API token authentication

pub mod note_repository;
pub mod todo_repository;
pub mod token_repository;
pub mod user_repository;

pub use note_repository::NoteRepository;
pub use todo_repository::TodoRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use note_repository::MockNoteRepository;
#[cfg(test)]
pub use todo_repository::MockTodoRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

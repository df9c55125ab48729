//! PostgreSQL repository implementations.
//!
//! Queries are built with `sqlx::query_as` and mapped through private row
//! structs so the domain entities stay free of `sqlx` derives.
//!
//! # Repositories
//!
//! - [`PgTodoRepository`] - Todo storage
//! - [`PgNoteRepository`] - Note storage
//! - [`PgUserRepository`] - User accounts
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_note_repository;
pub mod pg_todo_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_note_repository::PgNoteRepository;
pub use pg_todo_repository::PgTodoRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;

//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and business rules and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::todo_service::TodoService`] - Todo CRUD
//! - [`services::note_service::NoteService`] - Note list/create/delete
//! - [`services::auth_service::AuthService`] - Accounts and API tokens

pub mod services;

//! Handlers for the note resource.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::note::{CreateNoteRequest, NoteResponse};
use crate::api::extract::{AuthUser, ResourceId};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's notes, newest first.
///
/// # Endpoint
///
/// `GET /api/notes/`
pub async fn list_notes_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let notes = state.note_service.list_notes(user.user_id).await?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Creates a note authored by the caller.
///
/// # Endpoint
///
/// `POST /api/notes/`
pub async fn create_note_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), AppError> {
    payload.validate()?;

    let note = state
        .note_service
        .create_note(user.user_id, payload.title, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(note.into())))
}

/// Deletes one of the caller's notes.
///
/// # Endpoint
///
/// `DELETE /api/notes/delete/{id}/`
///
/// The delete lives under a static `delete` segment; `/api/notes/{id}/`
/// is not a route.
///
/// # Errors
///
/// Returns 404 if the note doesn't exist or was written by another user.
pub async fn delete_note_handler(
    ResourceId(id): ResourceId,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    state.note_service.delete_note(id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for registration, login and logout.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::api::extract::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account and returns its first token.
///
/// # Endpoint
///
/// `POST /api/auth/register/`
///
/// # Errors
///
/// Returns 400 on invalid username/password and 409 if the username is taken.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let issued = state
        .auth_service
        .register(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(issued.into())))
}

/// Exchanges credentials for a new token.
///
/// # Endpoint
///
/// `POST /api/auth/login/`
///
/// # Errors
///
/// Returns 401 on unknown username or wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let issued = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(issued.into()))
}

/// Revokes the token used for this request.
///
/// # Endpoint
///
/// `POST /api/auth/logout/`
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(&user.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

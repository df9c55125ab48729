//! Token authentication for the protected API routes.

use axum::{
    RequestExt,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::api::extract::AuthUser;
use crate::{error::AppError, state::AppState};

/// Resolves `Authorization: Bearer <token>` (or `Token <token>`) to a user.
///
/// On success an [`AuthUser`] is inserted into the request extensions, where
/// handlers read it with `Extension<AuthUser>`.
///
/// # Errors
///
/// `401 Unauthorized` (with `WWW-Authenticate: Bearer`) when the header is
/// missing, uses another scheme, or carries an unknown or revoked token.
pub async fn layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match req.extract_parts::<AuthBearer>().await {
        Ok(AuthBearer(token)) => token,
        Err(_) => token_scheme(&req).ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?,
    };

    let user_id = state.auth_service.authenticate(&token).await?;
    tracing::debug!(user_id, path = %req.uri().path(), "Request authenticated");

    req.extensions_mut().insert(AuthUser { user_id, token });
    Ok(next.run(req).await)
}

/// Key from an `Authorization: Token <key>` header.
fn token_scheme(req: &Request) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let key = value.strip_prefix("Token ")?.trim();
    (!key.is_empty()).then(|| key.to_string())
}

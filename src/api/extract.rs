//! Request extractors shared by the API handlers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde_json::json;

use crate::error::AppError;

/// Integer identifier taken from the `{id}` path segment.
///
/// Only a non-empty run of ASCII digits that fits in `i64` is accepted. A
/// sign, whitespace or any other character is treated as a routing miss and
/// rejected with `404 Not Found`, the same as a path that matches no route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| route_not_found(parts.uri.path()))?;

        parse_resource_id(&raw)
            .map(ResourceId)
            .ok_or_else(|| route_not_found(parts.uri.path()))
    }
}

/// Parses a decimal identifier.
pub fn parse_resource_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Error returned when no route matches a request.
pub fn route_not_found(path: &str) -> AppError {
    AppError::not_found("No route matches this path", json!({ "path": path }))
}

/// Identity of the caller, inserted by [`crate::api::middleware::auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    /// The raw bearer token the request was authenticated with.
    pub token: String,
}

//! Early rejection of malformed `{id}` path segments.

use axum::{
    extract::{OriginalUri, Request},
    middleware::Next,
    response::Response,
};

use crate::api::extract::route_not_found;
use crate::api::routes::has_malformed_id;
use crate::error::AppError;

/// Answers `404` for a path shaped like an `{id}` route whose id is not a
/// plain non-negative integer.
///
/// Runs outside authentication and method dispatch, so `/api/todos/abc`
/// is a missing route whether or not a token is sent and whatever the verb.
pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.clone())
        .unwrap_or_else(|| req.uri().clone());

    if has_malformed_id(uri.path()) {
        tracing::debug!(path = %uri.path(), "Rejected malformed resource id");
        return Err(route_not_found(uri.path()));
    }

    Ok(next.run(req).await)
}

//! Handler for the API root index.

use axum::Json;

use crate::api::dto::index::{RouteIndexResponse, RouteItem};
use crate::api::routes::{API_PREFIX, ROUTES};

/// Lists every named route from the static route table.
///
/// # Endpoint
///
/// `GET /api/`
pub async fn index_handler() -> Json<RouteIndexResponse> {
    let routes = ROUTES
        .iter()
        .map(|r| RouteItem {
            name: r.name,
            method: r.verb.as_str(),
            path: format!("{API_PREFIX}{}/", r.path.trim_end_matches('/')),
        })
        .collect();

    Json(RouteIndexResponse { routes })
}

//! DTOs for the API root index.

use serde::Serialize;

/// One named route.
#[derive(Debug, Serialize)]
pub struct RouteItem {
    pub name: &'static str,
    pub method: &'static str,
    pub path: String,
}

/// Response for `GET /api`.
#[derive(Debug, Serialize)]
pub struct RouteIndexResponse {
    pub routes: Vec<RouteItem>,
}

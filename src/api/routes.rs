//! API route table.
//!
//! Every route the API serves is listed once in [`ROUTES`] as an explicit
//! `(method, path, name)` entry bound to its handler. Nothing is derived from
//! resource registrations: the six todo routes are six entries.
//!
//! Paths are declared without a trailing slash. The top-level router trims
//! trailing slashes before matching, so `/api/todos/` and `/api/todos` reach
//! the same entry.

use crate::api::handlers::{
    create_note_handler, create_todo_handler, delete_note_handler, delete_todo_handler,
    get_todo_handler, index_handler, list_notes_handler, list_todos_handler, login_handler,
    logout_handler, register_handler, replace_todo_handler, update_todo_handler,
};
use crate::api::extract::parse_resource_id;
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{MethodFilter, MethodRouter, on},
};

/// Prefix under which [`api_router`] is nested.
pub const API_PREFIX: &str = "/api";

/// HTTP method of a route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    pub fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Delete => MethodFilter::DELETE,
        }
    }
}

/// Whether a route requires a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

/// One entry of the route table.
#[derive(Debug)]
pub struct Route {
    pub name: &'static str,
    pub verb: Verb,
    /// axum path pattern relative to [`API_PREFIX`].
    pub path: &'static str,
    pub access: Access,
    bind: fn(MethodFilter) -> MethodRouter<AppState>,
}

impl Route {
    /// Method router serving this entry.
    pub fn method_router(&self) -> MethodRouter<AppState> {
        (self.bind)(self.verb.filter())
    }
}

/// Every API route.
///
/// | Name | Method | Path |
/// |---|---|---|
/// | `todo-list` | GET | `/todos/` |
/// | `todo-create` | POST | `/todos/` |
/// | `todo-detail` | GET | `/todos/{id}/` |
/// | `todo-update` | PUT | `/todos/{id}/` |
/// | `todo-partial-update` | PATCH | `/todos/{id}/` |
/// | `todo-destroy` | DELETE | `/todos/{id}/` |
/// | `note-list` | GET | `/notes/` |
/// | `note-create` | POST | `/notes/` |
/// | `delete-note` | DELETE | `/notes/delete/{id}/` |
pub static ROUTES: &[Route] = &[
    Route {
        name: "api-root",
        verb: Verb::Get,
        path: "/",
        access: Access::Public,
        bind: |m| on(m, index_handler),
    },
    Route {
        name: "todo-list",
        verb: Verb::Get,
        path: "/todos",
        access: Access::Authenticated,
        bind: |m| on(m, list_todos_handler),
    },
    Route {
        name: "todo-create",
        verb: Verb::Post,
        path: "/todos",
        access: Access::Authenticated,
        bind: |m| on(m, create_todo_handler),
    },
    Route {
        name: "todo-detail",
        verb: Verb::Get,
        path: "/todos/{id}",
        access: Access::Authenticated,
        bind: |m| on(m, get_todo_handler),
    },
    Route {
        name: "todo-update",
        verb: Verb::Put,
        path: "/todos/{id}",
        access: Access::Authenticated,
        bind: |m| on(m, replace_todo_handler),
    },
    Route {
        name: "todo-partial-update",
        verb: Verb::Patch,
        path: "/todos/{id}",
        access: Access::Authenticated,
        bind: |m| on(m, update_todo_handler),
    },
    Route {
        name: "todo-destroy",
        verb: Verb::Delete,
        path: "/todos/{id}",
        access: Access::Authenticated,
        bind: |m| on(m, delete_todo_handler),
    },
    Route {
        name: "note-list",
        verb: Verb::Get,
        path: "/notes",
        access: Access::Authenticated,
        bind: |m| on(m, list_notes_handler),
    },
    Route {
        name: "note-create",
        verb: Verb::Post,
        path: "/notes",
        access: Access::Authenticated,
        bind: |m| on(m, create_note_handler),
    },
    Route {
        name: "delete-note",
        verb: Verb::Delete,
        path: "/notes/delete/{id}",
        access: Access::Authenticated,
        bind: |m| on(m, delete_note_handler),
    },
    Route {
        name: "auth-register",
        verb: Verb::Post,
        path: "/auth/register",
        access: Access::Public,
        bind: |m| on(m, register_handler),
    },
    Route {
        name: "auth-login",
        verb: Verb::Post,
        path: "/auth/login",
        access: Access::Public,
        bind: |m| on(m, login_handler),
    },
    Route {
        name: "auth-logout",
        verb: Verb::Post,
        path: "/auth/logout",
        access: Access::Authenticated,
        bind: |m| on(m, logout_handler),
    },
];

/// Whether `path` (prefix included) fits an `{id}` entry of [`ROUTES`] except
/// that its id is not a plain non-negative integer.
pub fn has_malformed_id(path: &str) -> bool {
    let Some(rest) = path.strip_prefix(API_PREFIX) else {
        return false;
    };
    let segments: Vec<&str> = rest.split('/').collect();

    ROUTES
        .iter()
        .filter(|r| r.path.contains("{id}"))
        .any(|r| {
            let pattern: Vec<&str> = r.path.split('/').collect();
            if pattern.len() != segments.len() {
                return false;
            }
            let mut malformed = false;
            for (expected, actual) in pattern.iter().zip(&segments) {
                if *expected == "{id}" {
                    malformed |= parse_resource_id(actual).is_none();
                } else if expected != actual {
                    return false;
                }
            }
            malformed
        })
}

/// Builds a router from every entry with the given access level.
///
/// Entries sharing a path are merged into one method router, so
/// `GET /todos` and `POST /todos` dispatch by method on a single path.
pub fn routes_for(access: Access) -> Router<AppState> {
    ROUTES
        .iter()
        .filter(|r| r.access == access)
        .fold(Router::new(), |router, r| {
            router.route(r.path, r.method_router())
        })
}

/// Routes reachable without a token.
pub fn public_routes() -> Router<AppState> {
    routes_for(Access::Public)
}

/// Routes protected by Bearer token authentication.
pub fn protected_routes() -> Router<AppState> {
    routes_for(Access::Authenticated)
}

/// The complete API router, with authentication applied to protected routes.
pub fn api_router(state: AppState) -> Router<AppState> {
    protected_routes()
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
        .merge(public_routes())
}

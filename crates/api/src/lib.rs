//! HTTP API layer for tvk-site.
//!
//! - **Endpoints**: public content, member actions and the admin console
//! - **Extractors**: session token, signed-in user, administrator
//! - **Middleware**: bearer-token session lookup
//! - **Sessions**: in-memory token table with per-session drag state
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod session;

use axum::{Router, extract::DefaultBodyLimit};

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
pub use session::{Session, SessionStore};

/// Request body limit. Images travel inline as base64 data URLs.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// The full API with session middleware and body limit applied.
pub fn app(state: AppState) -> Router {
    router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

//! API endpoints.

#![allow(missing_docs)]

mod admin;
mod assistant;
mod auth;
mod content;
mod media;
mod poll;
mod suggestions;
mod ticker;
pub mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    let admin = Router::new()
        .merge(admin::router())
        .merge(content::admin_router())
        .merge(poll::admin_router())
        .merge(ticker::admin_router())
        .merge(suggestions::admin_router());

    Router::new()
        .nest("/auth", auth::router())
        .nest("/content", content::public_router())
        .merge(ticker::router())
        .merge(poll::router())
        .merge(media::router())
        .merge(assistant::router())
        .merge(suggestions::router())
        .merge(users::router())
        .nest("/admin", admin)
}

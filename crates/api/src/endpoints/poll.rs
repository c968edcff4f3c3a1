//! Poll and vote endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use tvk_common::AppResult;
use tvk_core::Actor;
use tvk_db::entities::{PollData, VoteOption};

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Public poll router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/poll", get(get_poll))
        .route("/votes", get(list_votes))
        .route("/votes/{id}", post(cast_vote))
}

/// Admin poll router.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/poll", put(set_poll))
        .route("/votes", put(set_vote_options))
}

/// The curated poll.
async fn get_poll(State(state): State<AppState>) -> AppResult<ApiResponse<PollData>> {
    Ok(ApiResponse::ok(state.poll_service.get_poll().await?))
}

/// Public vote counters.
async fn list_votes(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<VoteOption>>> {
    Ok(ApiResponse::ok(state.poll_service.list_votes().await?))
}

/// Cast one anonymous vote.
async fn cast_vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<VoteOption>> {
    Ok(ApiResponse::ok(state.poll_service.cast_vote(&id).await?))
}

/// Replace the curated poll.
async fn set_poll(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(poll): Json<PollData>,
) -> AppResult<ApiResponse<PollData>> {
    let poll = state
        .poll_service
        .set_poll(poll, &Actor::from(&admin))
        .await?;
    Ok(ApiResponse::ok(poll))
}

/// Replace the vote options.
async fn set_vote_options(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(options): Json<Vec<VoteOption>>,
) -> AppResult<ApiResponse<Vec<VoteOption>>> {
    let options = state
        .poll_service
        .set_vote_options(options, &Actor::from(&admin))
        .await?;
    Ok(ApiResponse::ok(options))
}

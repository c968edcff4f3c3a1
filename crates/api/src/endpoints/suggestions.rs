//! Manifesto suggestion endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tvk_common::AppResult;
use tvk_db::entities::{ManifestoSuggestion, NewSuggestion};

use crate::{
    extractors::{AdminUser, AuthUser},
    middleware::AppState,
    response::{ApiResponse, Created},
};

/// Suggestion from a signed-in member.
#[derive(Debug, Deserialize)]
pub struct SubmitSuggestionRequest {
    pub suggestion: String,
}

/// Admin reply to a suggestion.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub response: String,
}

/// Drafted reply text.
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub text: String,
}

/// Member suggestion router.
pub fn router() -> Router<AppState> {
    Router::new().route("/suggestions", post(submit_suggestion))
}

/// Admin suggestion router.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/suggestions", get(list_suggestions))
        .route("/suggestions/{id}/respond", post(respond))
        .route("/suggestions/{id}/draft", post(draft_response))
}

/// Submit a suggestion under the signed-in user's name.
async fn submit_suggestion(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SubmitSuggestionRequest>,
) -> AppResult<Created<ManifestoSuggestion>> {
    let suggestion = state
        .suggestion_service
        .submit(NewSuggestion {
            user: user.name,
            user_id: user.id,
            suggestion: req.suggestion,
        })
        .await?;
    Ok(Created(suggestion))
}

/// All suggestions, newest first.
async fn list_suggestions(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ManifestoSuggestion>>> {
    Ok(ApiResponse::ok(state.suggestion_service.list().await?))
}

/// Publish a reply.
async fn respond(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RespondRequest>,
) -> AppResult<ApiResponse<ManifestoSuggestion>> {
    let suggestion = state
        .suggestion_service
        .respond(&id, &req.response)
        .await?;
    Ok(ApiResponse::ok(suggestion))
}

/// Draft a reply with the assistant. Nothing is stored.
async fn draft_response(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<DraftResponse>> {
    let suggestion = state.suggestion_service.get(&id).await?;
    let text = state
        .assistant_service
        .draft_suggestion_response(&suggestion.suggestion)
        .await;
    Ok(ApiResponse::ok(DraftResponse { text }))
}

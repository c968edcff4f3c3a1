//! Assistant endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use tvk_common::{AppError, AppResult};
use tvk_core::AssistantReply;

use crate::{middleware::AppState, response::ApiResponse};

/// Question from a visitor.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub prompt: String,
}

/// Location to search around.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Create assistant router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assistant/ask", post(ask))
        .route("/assistant/nearby", post(nearby))
}

/// Ask the assistant. Always answers, falling back to a fixed message.
async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> ApiResponse<AssistantReply> {
    ApiResponse::ok(state.assistant_service.ask(&req.prompt).await)
}

/// Party offices and venues near a location.
async fn nearby(
    State(state): State<AppState>,
    Json(req): Json<NearbyRequest>,
) -> AppResult<ApiResponse<AssistantReply>> {
    let reply = state
        .assistant_service
        .nearby_offices(req.latitude, req.longitude)
        .await
        .ok_or_else(|| AppError::ExternalService("Location search is unavailable".to_string()))?;
    Ok(ApiResponse::ok(reply))
}

//! News ticker endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use serde::Deserialize;
use tvk_common::AppResult;
use tvk_core::Actor;
use tvk_db::entities::TickerItem;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Add-line request.
#[derive(Debug, Deserialize)]
pub struct AddTickerRequest {
    pub text: String,
}

/// Replace-all request.
#[derive(Debug, Deserialize)]
pub struct ReplaceTickerRequest {
    pub items: Vec<String>,
}

/// Public ticker router.
pub fn router() -> Router<AppState> {
    Router::new().route("/ticker", get(list_ticker))
}

/// Admin ticker router.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/ticker", get(list_ticker).put(replace_ticker).post(add_ticker))
        .route("/ticker/{index}", delete(remove_ticker))
}

/// Ticker lines in display order.
async fn list_ticker(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<TickerItem>>> {
    Ok(ApiResponse::ok(state.ticker_service.list().await?))
}

/// Prepend a line.
async fn add_ticker(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<AddTickerRequest>,
) -> AppResult<ApiResponse<Vec<TickerItem>>> {
    let items = state
        .ticker_service
        .add(&req.text, &Actor::from(&admin))
        .await?;
    Ok(ApiResponse::ok(items))
}

/// Overwrite all lines.
async fn replace_ticker(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<ReplaceTickerRequest>,
) -> AppResult<ApiResponse<Vec<TickerItem>>> {
    let items = state
        .ticker_service
        .replace_all(req.items, &Actor::from(&admin))
        .await?;
    Ok(ApiResponse::ok(items))
}

/// Remove the line at `index`.
async fn remove_ticker(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<ApiResponse<Vec<TickerItem>>> {
    let items = state
        .ticker_service
        .remove(index, &Actor::from(&admin))
        .await?;
    Ok(ApiResponse::ok(items))
}

//! Admin console endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tvk_common::{AppError, AppResult};
use tvk_core::{Actor, ContentKind, VerificationChannel};
use tvk_db::entities::Transaction;

use super::users::UserResponse;
use crate::{
    extractors::{AdminUser, SessionToken},
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Move one item within a list.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub kind: ContentKind,
    pub from: usize,
    pub to: usize,
}

/// Start dragging an item.
#[derive(Debug, Deserialize)]
pub struct DragStartRequest {
    pub kind: ContentKind,
    pub index: usize,
}

/// Drop the dragged item.
#[derive(Debug, Deserialize)]
pub struct DragDropRequest {
    pub kind: ContentKind,
    pub target: usize,
}

/// Whether a reorder changed anything.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub moved: bool,
}

/// Password reset request.
#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}

/// Verification request.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub channel: VerificationChannel,
}

/// Create admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reorder", post(reorder))
        .route("/drag/start", post(drag_start))
        .route("/drag/drop", post(drag_drop))
        .route("/users", get(list_users))
        .route("/users/{id}/password", post(set_password))
        .route("/users/{id}/verify", post(mark_verified))
        .route("/transactions", get(list_transactions))
}

/// Move an item directly by index.
async fn reorder(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> AppResult<ApiResponse<ReorderResponse>> {
    let moved = state
        .reorder_service
        .reorder(req.kind, req.from, req.to, &Actor::from(&admin))
        .await?;
    Ok(ApiResponse::ok(ReorderResponse { moved }))
}

/// Remember the dragged item for this session.
async fn drag_start(
    AdminUser(_): AdminUser,
    SessionToken(token): SessionToken,
    State(state): State<AppState>,
    Json(req): Json<DragStartRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .sessions
        .with_drag(&token, |drag| drag.start(req.kind, req.index))
        .await
        .ok_or(AppError::Unauthorized)?;
    Ok(response::ok())
}

/// Drop the dragged item. Mismatched lists and same-index drops are no-ops.
async fn drag_drop(
    AdminUser(admin): AdminUser,
    SessionToken(token): SessionToken,
    State(state): State<AppState>,
    Json(req): Json<DragDropRequest>,
) -> AppResult<ApiResponse<ReorderResponse>> {
    let mut drag = state
        .sessions
        .take_drag(&token)
        .await
        .ok_or(AppError::Unauthorized)?;

    let moved = state
        .reorder_service
        .drop_on(&mut drag, req.kind, req.target, &Actor::from(&admin))
        .await?;
    Ok(ApiResponse::ok(ReorderResponse { moved }))
}

/// All registered users.
async fn list_users(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.membership_service.list_users().await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Set or reset a user's password.
async fn set_password(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    state.auth_service.set_password(&id, &req.password).await?;
    Ok(response::ok())
}

/// Mark a user's email or mobile as verified.
async fn mark_verified(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<VerifyRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state
        .membership_service
        .mark_verified(&id, req.channel)
        .await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Activity log, newest first.
async fn list_transactions(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Transaction>>> {
    Ok(ApiResponse::ok(state.activity_log.list().await?))
}

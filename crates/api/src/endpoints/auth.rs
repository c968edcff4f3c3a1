//! Authentication endpoints.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use tvk_common::{AppError, AppResult};
use tvk_core::{SignInInput, SsoInput};
use validator::Validate;

use super::users::{SessionResponse, UserResponse};
use crate::{
    extractors::{AuthUser, SessionToken},
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Create auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(signin))
        .route("/sso", post(sso))
        .route("/signout", post(signout))
        .route("/me", get(me))
}

/// Sign in with email and password.
async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SignInInput>,
) -> AppResult<ApiResponse<SessionResponse>> {
    req.validate()?;

    let user = state
        .auth_service
        .authenticate(&req.email, &req.password)
        .await?
        .ok_or(AppError::Unauthorized)?;
    let token = state.sessions.create(&user.id).await;

    Ok(ApiResponse::ok(SessionResponse {
        token,
        user: user.into(),
    }))
}

/// Sign in with an identity asserted by a social provider.
async fn sso(
    State(state): State<AppState>,
    Json(req): Json<SsoInput>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let user = state.auth_service.upsert_sso_user(req).await?;
    let token = state.sessions.create(&user.id).await;

    Ok(ApiResponse::ok(SessionResponse {
        token,
        user: user.into(),
    }))
}

/// End the current session.
async fn signout(
    SessionToken(token): SessionToken,
    State(state): State<AppState>,
) -> impl IntoResponse {
    state.sessions.remove(&token).await;
    response::ok()
}

/// The signed-in user.
async fn me(AuthUser(user): AuthUser) -> ApiResponse<UserResponse> {
    ApiResponse::ok(user.into())
}

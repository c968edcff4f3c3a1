//! Member and profile endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tvk_common::AppResult;
use tvk_core::RegisterMemberInput;
use tvk_db::entities::{User, UserRole};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, Created},
};

/// Public user representation. Never includes the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
    pub joined_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_provider: Option<String>,
    pub email_verified: bool,
    pub mobile_verified: bool,
    pub has_password: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            has_password: user.password_hash.is_some(),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            membership_id: user.membership_id,
            avatar: user.avatar,
            mobile: user.mobile,
            constituency: user.constituency,
            joined_at: user.joined_at,
            sso_provider: user.sso_provider,
            email_verified: user.email_verified,
            mobile_verified: user.mobile_verified,
        }
    }
}

/// A signed-in user and their bearer token.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Avatar upload request.
#[derive(Debug, Deserialize)]
pub struct UpdateAvatarRequest {
    /// Image as a data URL.
    pub avatar: String,
}

/// Create member router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/members", post(register_member))
        .route("/me/avatar", put(update_avatar))
}

/// Join as a member. The new member is signed in straight away.
async fn register_member(
    State(state): State<AppState>,
    Json(input): Json<RegisterMemberInput>,
) -> AppResult<Created<SessionResponse>> {
    let user = state.membership_service.register_member(input).await?;
    let token = state.sessions.create(&user.id).await;

    Ok(Created(SessionResponse {
        token,
        user: user.into(),
    }))
}

/// Replace the signed-in user's avatar.
async fn update_avatar(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateAvatarRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state
        .membership_service
        .update_avatar(&user.id, &req.avatar)
        .await?;

    Ok(ApiResponse::ok(user.into()))
}

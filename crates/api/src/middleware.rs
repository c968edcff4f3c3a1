//! API middleware and shared state.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tvk_common::ImagePolicy;
use tvk_core::{
    AssistantService, AuthService, Catalog, MediaService, MembershipService, PollService,
    ReorderService, SuggestionService, TickerService,
};
use tvk_db::repositories::ActivityLog;
use tvk_db::SharedStore;

use crate::extractors::SessionToken;
use crate::session::SessionStore;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub membership_service: MembershipService,
    pub catalog: Catalog,
    pub ticker_service: TickerService,
    pub poll_service: PollService,
    pub suggestion_service: SuggestionService,
    pub media_service: MediaService,
    pub reorder_service: ReorderService,
    pub assistant_service: AssistantService,
    pub activity_log: ActivityLog,
    pub sessions: SessionStore,
}

impl AppState {
    /// Wire every service over one store.
    #[must_use]
    pub fn new(store: SharedStore, image_policy: ImagePolicy, assistant: AssistantService) -> Self {
        let log = ActivityLog::new(store.clone());
        let catalog = Catalog::new(store.clone(), log.clone());
        let ticker_service = TickerService::new(store.clone(), log.clone());
        let poll_service = PollService::new(store.clone(), log.clone());
        let reorder_service =
            ReorderService::new(catalog.clone(), ticker_service.clone(), poll_service.clone());

        Self {
            auth_service: AuthService::new(store.clone(), log.clone()),
            membership_service: MembershipService::new(store.clone(), log.clone(), image_policy),
            catalog,
            ticker_service,
            poll_service,
            suggestion_service: SuggestionService::new(store.clone(), log.clone()),
            media_service: MediaService::new(store),
            reorder_service,
            assistant_service: assistant,
            activity_log: log,
            sessions: SessionStore::new(),
        }
    }
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to its user and stores both in the request
/// extensions. Unknown tokens leave the request anonymous.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Some(user_id) = state.sessions.user_id(token).await
    {
        match state.auth_service.get_user(&user_id).await {
            Ok(user) => {
                let token = SessionToken(token.to_string());
                req.extensions_mut().insert(user);
                req.extensions_mut().insert(token);
            }
            Err(e) => {
                tracing::debug!(user_id = %user_id, error = %e, "Session user no longer exists");
            }
        }
    }

    next.run(req).await
}

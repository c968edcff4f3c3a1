//! In-memory sign-in sessions.
//!
//! Sessions live only in process memory and are lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tvk_common::IdGenerator;
use tvk_core::DragSession;

/// One signed-in browser.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Signed-in user.
    pub user_id: String,
    /// Admin drag-and-drop state for this session.
    pub drag: DragSession,
}

/// Bearer token to session table.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    id_gen: IdGenerator,
}

impl SessionStore {
    /// Create an empty session table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `user_id` and return its token.
    pub async fn create(&self, user_id: &str) -> String {
        let token = self.id_gen.generate_token();
        self.sessions.write().await.insert(
            token.clone(),
            Session {
                user_id: user_id.to_string(),
                drag: DragSession::default(),
            },
        );
        token
    }

    /// The user signed in with `token`.
    pub async fn user_id(&self, token: &str) -> Option<String> {
        self.sessions
            .read()
            .await
            .get(token)
            .map(|s| s.user_id.clone())
    }

    /// End the session. Unknown tokens are ignored.
    pub async fn remove(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Run `f` against the drag state of `token`'s session.
    pub async fn with_drag<R>(&self, token: &str, f: impl FnOnce(&mut DragSession) -> R) -> Option<R> {
        self.sessions
            .write()
            .await
            .get_mut(token)
            .map(|session| f(&mut session.drag))
    }

    /// Take the drag state of `token`'s session, leaving it idle.
    pub async fn take_drag(&self, token: &str) -> Option<DragSession> {
        self.with_drag(token, std::mem::take).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvk_core::ContentKind;

    #[tokio::test]
    async fn test_create_and_remove() {
        let sessions = SessionStore::new();
        let token = sessions.create("u1").await;

        assert_eq!(sessions.user_id(&token).await.as_deref(), Some("u1"));

        sessions.remove(&token).await;
        assert!(sessions.user_id(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_drag_state_is_per_session() {
        let sessions = SessionStore::new();
        let a = sessions.create("u1").await;
        let b = sessions.create("u1").await;

        sessions
            .with_drag(&a, |drag| drag.start(ContentKind::Events, 0))
            .await
            .unwrap();

        let from_b = sessions
            .with_drag(&b, |drag| drag.drop_on(ContentKind::Events, 2))
            .await
            .unwrap();
        let from_a = sessions
            .with_drag(&a, |drag| drag.drop_on(ContentKind::Events, 2))
            .await
            .unwrap();

        assert_eq!(from_b, None);
        assert_eq!(from_a, Some((0, 2)));
        assert!(sessions.with_drag("missing", |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn test_take_drag_leaves_session_idle() {
        let sessions = SessionStore::new();
        let token = sessions.create("u1").await;
        sessions
            .with_drag(&token, |drag| drag.start(ContentKind::Ticker, 1))
            .await
            .unwrap();

        let mut taken = sessions.take_drag(&token).await.unwrap();
        assert_eq!(taken.drop_on(ContentKind::Ticker, 0), Some((1, 0)));
        assert_eq!(
            sessions.take_drag(&token).await.unwrap(),
            DragSession::default()
        );
        assert!(sessions.take_drag("missing").await.is_none());
    }
}

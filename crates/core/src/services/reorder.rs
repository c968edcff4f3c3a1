//! Drag-and-drop ordering of content lists.
//!
//! Display order is storage order, so reordering is a splice on the stored
//! array followed by a whole-list write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tvk_common::{AppError, AppResult};

use super::catalog::Catalog;
use super::content::Actor;
use super::poll::PollService;
use super::ticker::TickerService;

/// Move the element at `from` so it ends up at index `to`.
///
/// The element is removed first and inserted at `to` in the shortened
/// list. Returns `Ok(false)` when `from == to`, whatever the length.
///
/// # Errors
///
/// Returns `BadRequest` when either index is out of range; `items` is left
/// untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> AppResult<bool> {
    if from == to {
        return Ok(false);
    }
    let len = items.len();
    if from >= len || to >= len {
        return Err(AppError::BadRequest(format!(
            "Reorder index out of range: {from} -> {to} (length {len})"
        )));
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(true)
}

/// Every list the admin console can reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Banners,
    Events,
    #[serde(rename = "manifesto")]
    ManifestoPoints,
    Leadership,
    Ideology,
    Achievements,
    Media,
    PollOptions,
    Ticker,
}

impl ContentKind {
    /// Path segment and wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Banners => "banners",
            Self::Events => "events",
            Self::ManifestoPoints => "manifesto",
            Self::Leadership => "leadership",
            Self::Ideology => "ideology",
            Self::Achievements => "achievements",
            Self::Media => "media",
            Self::PollOptions => "poll-options",
            Self::Ticker => "ticker",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "banners" => Ok(Self::Banners),
            "events" => Ok(Self::Events),
            "manifesto" => Ok(Self::ManifestoPoints),
            "leadership" => Ok(Self::Leadership),
            "ideology" => Ok(Self::Ideology),
            "achievements" => Ok(Self::Achievements),
            "media" => Ok(Self::Media),
            "poll-options" => Ok(Self::PollOptions),
            "ticker" => Ok(Self::Ticker),
            other => Err(AppError::BadRequest(format!("Unknown content kind: {other}"))),
        }
    }
}

/// The item currently being dragged in one admin session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSession {
    dragging: Option<(ContentKind, usize)>,
}

impl DragSession {
    /// Remember the dragged item, replacing any earlier one.
    pub fn start(&mut self, kind: ContentKind, index: usize) {
        self.dragging = Some((kind, index));
    }

    /// Drop onto `target` in a list of `kind`.
    ///
    /// Yields `(from, to)` only when a drag of the same kind is in progress
    /// and the indices differ. The session is cleared either way.
    pub fn drop_on(&mut self, kind: ContentKind, target: usize) -> Option<(usize, usize)> {
        let (dragged_kind, from) = self.dragging.take()?;
        (dragged_kind == kind && from != target).then_some((from, target))
    }
}

/// Applies moves to whichever list a [`ContentKind`] names.
#[derive(Clone)]
pub struct ReorderService {
    catalog: Catalog,
    ticker: TickerService,
    poll: PollService,
}

impl ReorderService {
    /// Create a new reorder service.
    #[must_use]
    pub const fn new(catalog: Catalog, ticker: TickerService, poll: PollService) -> Self {
        Self {
            catalog,
            ticker,
            poll,
        }
    }

    /// Move one element of the `kind` list and persist the new order.
    ///
    /// Returns whether anything moved. Concurrent edits to the same list
    /// are not detected; the last write wins.
    pub async fn reorder(
        &self,
        kind: ContentKind,
        from: usize,
        to: usize,
        actor: &Actor,
    ) -> AppResult<bool> {
        let moved = match kind {
            ContentKind::Banners => self.catalog.banners.reorder(from, to, actor).await?,
            ContentKind::Events => self.catalog.events.reorder(from, to, actor).await?,
            ContentKind::ManifestoPoints => {
                self.catalog.manifesto.reorder(from, to, actor).await?
            }
            ContentKind::Leadership => self.catalog.leadership.reorder(from, to, actor).await?,
            ContentKind::Ideology => self.catalog.ideology.reorder(from, to, actor).await?,
            ContentKind::Achievements => {
                self.catalog.achievements.reorder(from, to, actor).await?
            }
            ContentKind::Media => self.catalog.media.reorder(from, to, actor).await?,
            ContentKind::PollOptions => self.poll.reorder_options(from, to, actor).await?,
            ContentKind::Ticker => self.ticker.reorder(from, to, actor).await?,
        };

        if moved {
            tracing::info!(kind = %kind, from, to, "List reordered");
        }
        Ok(moved)
    }

    /// Complete a drag started in `session`. The session is left idle;
    /// a drop on another list or on the starting index moves nothing.
    pub async fn drop_on(
        &self,
        session: &mut DragSession,
        kind: ContentKind,
        target: usize,
        actor: &Actor,
    ) -> AppResult<bool> {
        match session.drop_on(kind, target) {
            Some((from, to)) => self.reorder(kind, from, to, actor).await,
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvk_db::entities::TickerItem;
    use tvk_db::repositories::ActivityLog;
    use tvk_db::test_utils::seeded_store;

    fn letters() -> Vec<char> {
        vec!['A', 'B', 'C', 'D']
    }

    fn reorder_service(store: tvk_db::SharedStore) -> ReorderService {
        let log = ActivityLog::new(store.clone());
        ReorderService::new(
            Catalog::new(store.clone(), log.clone()),
            TickerService::new(store.clone(), log.clone()),
            PollService::new(store, log),
        )
    }

    #[test]
    fn test_move_forward() {
        let mut items = letters();
        assert!(move_item(&mut items, 0, 2).unwrap());
        assert_eq!(items, vec!['B', 'C', 'A', 'D']);
    }

    #[test]
    fn test_move_backward() {
        let mut items = letters();
        assert!(move_item(&mut items, 3, 0).unwrap());
        assert_eq!(items, vec!['D', 'A', 'B', 'C']);
    }

    #[test]
    fn test_move_same_index_is_noop() {
        for i in 0..4 {
            let mut items = letters();
            assert!(!move_item(&mut items, i, i).unwrap());
            assert_eq!(items, letters());
        }
    }

    #[test]
    fn test_move_same_index_on_empty_list_is_noop() {
        let mut items: Vec<char> = Vec::new();
        assert!(!move_item(&mut items, 0, 0).unwrap());
        assert!(!move_item(&mut items, 7, 7).unwrap());
        assert!(move_item(&mut items, 0, 1).is_err());
    }

    #[test]
    fn test_move_out_of_range_leaves_list() {
        let mut items = letters();
        let err = move_item(&mut items, 4, 0).unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
        assert!(move_item(&mut items, 0, 9).is_err());
        assert_eq!(items, letters());
    }

    #[test]
    fn test_content_kind_parses_wire_names() {
        assert_eq!("manifesto".parse::<ContentKind>().unwrap(), ContentKind::ManifestoPoints);
        assert_eq!("poll-options".parse::<ContentKind>().unwrap(), ContentKind::PollOptions);
        assert!("users".parse::<ContentKind>().is_err());
        assert_eq!(
            serde_json::to_string(&ContentKind::PollOptions).unwrap(),
            "\"poll-options\""
        );
        assert_eq!(
            serde_json::from_str::<ContentKind>("\"manifesto\"").unwrap(),
            ContentKind::ManifestoPoints
        );
    }

    #[test]
    fn test_drop_on_matching_kind_yields_move() {
        let mut session = DragSession::default();
        session.start(ContentKind::Events, 0);

        assert_eq!(session.drop_on(ContentKind::Events, 2), Some((0, 2)));
        assert_eq!(session, DragSession::default());
    }

    #[test]
    fn test_drop_on_other_kind_is_ignored_and_clears() {
        let mut session = DragSession::default();
        session.start(ContentKind::Events, 0);

        assert_eq!(session.drop_on(ContentKind::Banners, 1), None);
        assert_eq!(session, DragSession::default());
        assert_eq!(session.drop_on(ContentKind::Events, 1), None);
    }

    #[test]
    fn test_drop_on_same_index_is_ignored() {
        let mut session = DragSession::default();
        session.start(ContentKind::Ticker, 1);
        assert_eq!(session.drop_on(ContentKind::Ticker, 1), None);
    }

    #[tokio::test]
    async fn test_reorder_events_persists() {
        let store = seeded_store().await;
        let service = reorder_service(store.clone());

        let moved = service
            .reorder(ContentKind::Events, 2, 0, &Actor::system())
            .await
            .unwrap();
        assert!(moved);

        let ids: Vec<String> = Catalog::new(store.clone(), ActivityLog::new(store))
            .events
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["e3", "e1", "e2"]);
    }

    #[tokio::test]
    async fn test_reorder_poll_options_and_ticker() {
        let store = seeded_store().await;
        let log = ActivityLog::new(store.clone());
        let service = reorder_service(store.clone());
        let ticker = TickerService::new(store.clone(), log.clone());
        let poll = PollService::new(store, log.clone());

        let before: Vec<TickerItem> = ticker.list().await.unwrap();
        service
            .reorder(ContentKind::Ticker, 0, 2, &Actor::system())
            .await
            .unwrap();
        let after = ticker.list().await.unwrap();
        assert_eq!(after[2], before[0]);

        service
            .reorder(ContentKind::PollOptions, 3, 0, &Actor::system())
            .await
            .unwrap();
        let ids: Vec<String> = poll
            .get_poll()
            .await
            .unwrap()
            .options
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["p4", "p1", "p2", "p3"]);

        assert_eq!(log.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_drop_on_mismatched_kind_writes_nothing() {
        let store = seeded_store().await;
        let log = ActivityLog::new(store.clone());
        let service = reorder_service(store);

        let mut session = DragSession::default();
        session.start(ContentKind::Banners, 0);
        let moved = service
            .drop_on(&mut session, ContentKind::Events, 1, &Actor::system())
            .await
            .unwrap();

        assert!(!moved);
        assert!(log.list().await.unwrap().is_empty());
    }
}

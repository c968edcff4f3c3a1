//! Opinion poll and public vote service.

use std::collections::{HashMap, HashSet};

use tvk_common::{AppError, AppResult};
use tvk_db::entities::{PollData, TransactionType, VoteOption};
use tvk_db::repositories::{ActivityLog, RecordRepository, Repository};
use tvk_db::SharedStore;

use super::content::Actor;
use super::reorder::move_item;

/// Service for the curated poll and the public vote counters.
#[derive(Clone)]
pub struct PollService {
    poll: RecordRepository<PollData>,
    votes: Repository<VoteOption>,
    log: ActivityLog,
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub fn new(store: SharedStore, log: ActivityLog) -> Self {
        Self {
            poll: RecordRepository::new(store.clone()),
            votes: Repository::new(store),
            log,
        }
    }

    /// The poll shown on the home page.
    pub async fn get_poll(&self) -> AppResult<PollData> {
        self.poll.get().await
    }

    /// Replace the poll. Percentages are admin-set and must be 0..=100;
    /// option ids must be unique.
    pub async fn set_poll(&self, poll: PollData, actor: &Actor) -> AppResult<PollData> {
        if poll.question.trim().is_empty() {
            return Err(AppError::Validation("Poll question cannot be blank".to_string()));
        }
        let mut seen = HashSet::new();
        for option in &poll.options {
            if option.percentage > 100 {
                return Err(AppError::Validation(format!(
                    "Percentage for {} must be between 0 and 100",
                    option.id
                )));
            }
            if !seen.insert(option.id.as_str()) {
                return Err(AppError::Conflict(format!("Duplicate poll option: {}", option.id)));
            }
        }

        self.poll.set(&poll).await?;
        self.log
            .append(actor.log(TransactionType::Content, "Updated poll"))
            .await?;

        Ok(poll)
    }

    /// Move the poll option at `from` to `to`.
    pub async fn reorder_options(&self, from: usize, to: usize, actor: &Actor) -> AppResult<bool> {
        let mut poll = self.poll.get().await?;
        if !move_item(&mut poll.options, from, to)? {
            return Ok(false);
        }

        self.poll.set(&poll).await?;
        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Reordered poll options: {from} -> {to}"),
            ))
            .await?;

        Ok(true)
    }

    /// Vote counters in display order.
    pub async fn list_votes(&self) -> AppResult<Vec<VoteOption>> {
        self.votes.list().await
    }

    /// Add one vote to `option_id`.
    ///
    /// This is a read-increment-write on the whole list; two concurrent
    /// callers can lose a vote.
    pub async fn cast_vote(&self, option_id: &str) -> AppResult<VoteOption> {
        let mut options = self.votes.list().await?;

        let Some(option) = options.iter_mut().find(|o| o.id == option_id) else {
            return Err(AppError::NotFound(format!("Vote option not found: {option_id}")));
        };
        option.votes = option.votes.saturating_add(1);
        let updated = option.clone();

        self.votes.replace_all(&options).await?;
        self.log
            .append(Actor::anonymous().log(
                TransactionType::Vote,
                format!("Vote cast for option ID: {option_id}"),
            ))
            .await?;

        tracing::info!(option_id = %option_id, votes = updated.votes, "Vote cast");
        Ok(updated)
    }

    /// Replace the vote options. Existing counters may not go down.
    pub async fn set_vote_options(
        &self,
        options: Vec<VoteOption>,
        actor: &Actor,
    ) -> AppResult<Vec<VoteOption>> {
        let current: HashMap<String, u64> = self
            .votes
            .list()
            .await?
            .into_iter()
            .map(|o| (o.id, o.votes))
            .collect();

        let mut seen = HashSet::new();
        for option in &options {
            if option.label.trim().is_empty() {
                return Err(AppError::Validation("Vote option label cannot be blank".to_string()));
            }
            if !seen.insert(option.id.as_str()) {
                return Err(AppError::Conflict(format!("Duplicate vote option: {}", option.id)));
            }
            if let Some(&existing) = current.get(&option.id)
                && option.votes < existing
            {
                return Err(AppError::BadRequest(format!(
                    "Vote count for {} cannot decrease from {existing}",
                    option.id
                )));
            }
        }

        self.votes.replace_all(&options).await?;
        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Updated vote options ({} options)", options.len()),
            ))
            .await?;

        Ok(options)
    }
}

//! Manifesto suggestions from members.

use tvk_common::{AppError, AppResult, IdGenerator};
use tvk_db::entities::{
    Entity, ManifestoSuggestion, NewSuggestion, SuggestionStatus, TransactionType,
};
use tvk_db::repositories::{ActivityLog, Repository};
use tvk_db::SharedStore;
use validator::Validate;

use super::content::Actor;

/// Characters of the suggestion quoted in the activity log.
const EXCERPT_LEN: usize = 30;

/// Service for member suggestions and admin responses.
#[derive(Clone)]
pub struct SuggestionService {
    repo: Repository<ManifestoSuggestion>,
    log: ActivityLog,
    id_gen: IdGenerator,
}

impl SuggestionService {
    /// Create a new suggestion service.
    #[must_use]
    pub fn new(store: SharedStore, log: ActivityLog) -> Self {
        Self {
            repo: Repository::new(store),
            log,
            id_gen: IdGenerator::new(),
        }
    }

    /// All suggestions, newest first.
    pub async fn list(&self) -> AppResult<Vec<ManifestoSuggestion>> {
        self.repo.list().await
    }

    /// Get a suggestion by ID.
    pub async fn get(&self, id: &str) -> AppResult<ManifestoSuggestion> {
        self.repo.get_by_id(id).await
    }

    /// Store a new pending suggestion at the front of the list.
    pub async fn submit(&self, draft: NewSuggestion) -> AppResult<ManifestoSuggestion> {
        let draft = NewSuggestion {
            suggestion: draft.suggestion.trim().to_string(),
            ..draft
        };
        draft.validate()?;

        let mut items = self.repo.list().await?;
        let mut id = self.id_gen.generate();
        while items.iter().any(|s| s.id == id) {
            id = self.id_gen.generate();
        }

        let actor = Actor {
            user_id: draft.user_id.clone(),
            user_name: draft.user.clone(),
        };
        let suggestion = ManifestoSuggestion::from_draft(id, draft);
        items.insert(0, suggestion.clone());
        self.repo.replace_all(&items).await?;

        self.log
            .append(actor.log(
                TransactionType::Suggestion,
                format!(
                    "Policy suggestion submitted: \"{}...\"",
                    excerpt(&suggestion.suggestion)
                ),
            ))
            .await?;

        tracing::info!(id = %suggestion.id, user_id = %suggestion.user_id, "Suggestion submitted");
        Ok(suggestion)
    }

    /// Attach an admin response and mark the suggestion responded.
    pub async fn respond(&self, id: &str, response: &str) -> AppResult<ManifestoSuggestion> {
        let response = response.trim();
        if response.is_empty() {
            return Err(AppError::Validation("Response cannot be blank".to_string()));
        }

        let mut items = self.repo.list().await?;
        let Some(item) = items.iter_mut().find(|s| s.id == id) else {
            return Err(AppError::NotFound(format!("Suggestion not found: {id}")));
        };
        item.response = Some(response.to_string());
        item.status = SuggestionStatus::Responded;
        let updated = item.clone();

        self.repo.replace_all(&items).await?;
        tracing::info!(id = %id, "Suggestion responded");
        Ok(updated)
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LEN).collect()
}

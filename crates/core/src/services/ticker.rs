//! News ticker service.

use tvk_common::{AppError, AppResult};
use tvk_db::entities::{TickerItem, TransactionType};
use tvk_db::repositories::{ActivityLog, Repository};
use tvk_db::SharedStore;

use super::content::Actor;
use super::reorder::move_item;

/// Maximum length of one ticker line, in characters.
const MAX_TICKER_LEN: usize = 280;

/// Service for the scrolling news ticker.
#[derive(Clone)]
pub struct TickerService {
    repo: Repository<TickerItem>,
    log: ActivityLog,
}

impl TickerService {
    /// Create a new ticker service.
    #[must_use]
    pub fn new(store: SharedStore, log: ActivityLog) -> Self {
        Self {
            repo: Repository::new(store),
            log,
        }
    }

    /// Ticker lines in display order.
    pub async fn list(&self) -> AppResult<Vec<TickerItem>> {
        self.repo.list().await
    }

    /// Add a line to the front of the ticker.
    pub async fn add(&self, text: &str, actor: &Actor) -> AppResult<Vec<TickerItem>> {
        let text = validate_line(text)?;

        let mut items = self.repo.list().await?;
        items.insert(0, TickerItem(text));
        self.repo.replace_all(&items).await?;

        self.log
            .append(actor.log(TransactionType::Content, "Added news ticker line"))
            .await?;

        Ok(items)
    }

    /// Remove the line at `index`.
    pub async fn remove(&self, index: usize, actor: &Actor) -> AppResult<Vec<TickerItem>> {
        let mut items = self.repo.list().await?;
        if index >= items.len() {
            return Err(AppError::NotFound(format!("Ticker line not found: {index}")));
        }

        let removed = items.remove(index);
        self.repo.replace_all(&items).await?;

        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Removed news ticker line: {}", removed.0),
            ))
            .await?;

        Ok(items)
    }

    /// Overwrite all lines. Blank lines are rejected.
    pub async fn replace_all(&self, lines: Vec<String>, actor: &Actor) -> AppResult<Vec<TickerItem>> {
        let items = lines
            .iter()
            .map(|line| validate_line(line).map(TickerItem))
            .collect::<AppResult<Vec<_>>>()?;

        self.repo.replace_all(&items).await?;
        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Replaced news ticker ({} lines)", items.len()),
            ))
            .await?;

        Ok(items)
    }

    /// Move the line at `from` to `to`.
    pub async fn reorder(&self, from: usize, to: usize, actor: &Actor) -> AppResult<bool> {
        let mut items = self.repo.list().await?;
        if !move_item(&mut items, from, to)? {
            return Ok(false);
        }

        self.repo.replace_all(&items).await?;
        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Reordered news ticker: {from} -> {to}"),
            ))
            .await?;

        Ok(true)
    }
}

fn validate_line(text: &str) -> AppResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Ticker line cannot be blank".to_string()));
    }
    if text.chars().count() > MAX_TICKER_LEN {
        return Err(AppError::Validation(format!(
            "Ticker line exceeds {MAX_TICKER_LEN} characters"
        )));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvk_db::test_utils::seeded_store;

    async fn service() -> TickerService {
        let store = seeded_store().await;
        TickerService::new(store.clone(), ActivityLog::new(store))
    }

    #[tokio::test]
    async fn test_add_prepends_trimmed_line() {
        let ticker = service().await;

        let items = ticker
            .add("  Rally in Trichy on Sunday  ", &Actor::system())
            .await
            .unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0], TickerItem::from("Rally in Trichy on Sunday"));
        assert_eq!(ticker.list().await.unwrap(), items);
    }

    #[tokio::test]
    async fn test_add_rejects_blank() {
        let ticker = service().await;

        let err = ticker.add("   ", &Actor::system()).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(ticker.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_remove_by_index() {
        let ticker = service().await;
        let before = ticker.list().await.unwrap();

        let after = ticker.remove(1, &Actor::system()).await.unwrap();
        assert_eq!(after, vec![before[0].clone(), before[2].clone()]);

        let err = ticker.remove(5, &Actor::system()).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_replace_all_overwrites() {
        let ticker = service().await;

        ticker
            .replace_all(vec!["One".to_string(), "Two".to_string()], &Actor::system())
            .await
            .unwrap();

        assert_eq!(
            ticker.list().await.unwrap(),
            vec![TickerItem::from("One"), TickerItem::from("Two")]
        );
    }
}

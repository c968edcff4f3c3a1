//! Bounded activity log.

use chrono::Utc;
use tvk_common::{AppResult, IdGenerator};

use super::Repository;
use crate::entities::{NewTransaction, Transaction};
use crate::store::SharedStore;

/// Number of records kept; older ones are dropped on append.
pub const MAX_TRANSACTIONS: usize = 100;

/// Append-only audit trail, newest first.
#[derive(Clone)]
pub struct ActivityLog {
    repo: Repository<Transaction>,
    id_gen: IdGenerator,
}

impl ActivityLog {
    /// Create an activity log over the `transactions` key.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            repo: Repository::new(store),
            id_gen: IdGenerator::new(),
        }
    }

    /// Record an action. Prepends, then truncates to [`MAX_TRANSACTIONS`].
    pub async fn append(&self, tx: NewTransaction) -> AppResult<Transaction> {
        let record = Transaction {
            id: self.id_gen.generate(),
            kind: tx.kind,
            user_id: tx.user_id,
            user_name: tx.user_name,
            timestamp: Utc::now(),
            details: tx.details,
        };

        let mut all = self.repo.list().await?;
        all.insert(0, record.clone());
        all.truncate(MAX_TRANSACTIONS);
        self.repo.replace_all(&all).await?;

        tracing::info!(
            kind = ?record.kind,
            user_id = %record.user_id,
            details = %record.details,
            "Activity logged"
        );

        Ok(record)
    }

    /// All retained records, newest first.
    pub async fn list(&self) -> AppResult<Vec<Transaction>> {
        self.repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TransactionType;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn vote(n: usize) -> NewTransaction {
        NewTransaction::new(TransactionType::Vote, "anon", "Verified Voter", n.to_string())
    }

    #[tokio::test]
    async fn test_append_is_newest_first() {
        let log = ActivityLog::new(Arc::new(MemoryStore::new()));

        log.append(vote(1)).await.unwrap();
        log.append(vote(2)).await.unwrap();

        let all = log.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].details, "2");
        assert_eq!(all[1].details, "1");
    }

    #[tokio::test]
    async fn test_log_keeps_only_most_recent() {
        let log = ActivityLog::new(Arc::new(MemoryStore::new()));

        for n in 0..150 {
            log.append(vote(n)).await.unwrap();
        }

        let all = log.list().await.unwrap();
        assert_eq!(all.len(), MAX_TRANSACTIONS);
        assert_eq!(all.first().unwrap().details, "149");
        assert_eq!(all.last().unwrap().details, "50");
        for (offset, tx) in all.iter().enumerate() {
            assert_eq!(tx.details, (149 - offset).to_string());
        }
    }

    #[tokio::test]
    async fn test_append_assigns_distinct_ids() {
        let log = ActivityLog::new(Arc::new(MemoryStore::new()));

        let a = log.append(vote(1)).await.unwrap();
        let b = log.append(vote(1)).await.unwrap();

        assert_ne!(a.id, b.id);
    }
}

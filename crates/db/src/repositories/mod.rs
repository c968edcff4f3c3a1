//! Repositories over the key-value store.
//!
//! Every list-valued key gets the same three operations: read the whole
//! list, overwrite the whole list, and (for entities with ids) create one
//! record. There is no partial update or delete; callers compute the next
//! list and hand it to `replace_all`.

pub mod activity_log;
pub mod collection;
pub mod record;

pub use activity_log::{ActivityLog, MAX_TRANSACTIONS};
pub use collection::Repository;
pub use record::RecordRepository;

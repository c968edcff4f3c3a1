//! ID generation utilities.

use chrono::{Datelike, Utc};
use rand::Rng;
use uuid::Uuid;

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new random UUID v4 entity ID.
    #[must_use]
    pub fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Generate a cryptographically secure random token.
    #[must_use]
    pub fn generate_token(&self) -> String {
        // Use UUID v4 for tokens (no time component for security)
        Uuid::new_v4().simple().to_string()
    }

    /// Generate a human-facing membership number, e.g. `TVK-2024-48213`.
    ///
    /// The numeric part is random and not guaranteed unique; callers that
    /// need uniqueness must check against existing members.
    #[must_use]
    pub fn generate_membership_id(&self) -> String {
        let serial: u32 = rand::thread_rng().gen_range(10_000..100_000);
        format!("TVK-{}-{serial}", Utc::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_uuid_v4() {
        let id_gen = IdGenerator::new();
        let id = id_gen.generate();

        assert_eq!(id.len(), 36); // UUID with hyphens
        assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_generate_is_unique() {
        let id_gen = IdGenerator::new();
        let ids: HashSet<String> = (0..1000).map(|_| id_gen.generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generate_token() {
        let id_gen = IdGenerator::new();
        let token = id_gen.generate_token();

        assert_eq!(token.len(), 32); // Simple UUID without hyphens
    }

    #[test]
    fn test_membership_id_shape() {
        let id = IdGenerator::new().generate_membership_id();
        let parts: Vec<&str> = id.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TVK");
        assert_eq!(parts[2].len(), 5);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }
}

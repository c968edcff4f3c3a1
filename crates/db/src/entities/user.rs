//! User entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Collection, Entity};
use crate::keys::StoreKey;

/// Access level. The only access-control signal the site has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Not signed up.
    #[default]
    Guest,
    /// Registered member.
    Member,
    /// Content administrator.
    Admin,
}

impl UserRole {
    /// Members and admins count as members.
    #[must_use]
    pub const fn is_member(self) -> bool {
        matches!(self, Self::Member | Self::Admin)
    }
}

/// Site user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Sign-in email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Access level.
    #[serde(default)]
    pub role: UserRole,

    /// Human-facing membership number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<String>,

    /// Argon2 PHC string. `None` for SSO-only accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// Avatar as a data URL or remote URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,

    /// When the account was created.
    pub joined_at: DateTime<Utc>,

    /// Identity provider tag for social sign-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sso_provider: Option<String>,

    #[serde(default)]
    pub email_verified: bool,

    #[serde(default)]
    pub mobile_verified: bool,
}

/// Fields for a new user.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub role: UserRole,
    pub membership_id: Option<String>,
    pub password_hash: Option<String>,
    pub avatar: Option<String>,
    pub mobile: Option<String>,
    pub constituency: Option<String>,
    pub sso_provider: Option<String>,
    pub email_verified: bool,
}

impl Collection for User {
    const KEY: StoreKey = StoreKey::Users;
}

impl Entity for User {
    type Draft = NewUser;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewUser) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            membership_id: draft.membership_id,
            password_hash: draft.password_hash,
            avatar: draft.avatar,
            mobile: draft.mobile,
            constituency: draft.constituency,
            joined_at: Utc::now(),
            sso_provider: draft.sso_provider,
            email_verified: draft.email_verified,
            mobile_verified: false,
        }
    }
}

impl User {
    /// Case-insensitive email comparison.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(email.trim()))
    }
}

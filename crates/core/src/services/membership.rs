//! Member registration and profile upkeep.

use serde::Deserialize;
use tvk_common::data_url::validate_image;
use tvk_common::{AppError, AppResult, IdGenerator, ImagePolicy, hash_password};
use tvk_db::entities::{NewUser, TransactionType, User, UserRole};
use tvk_db::repositories::{ActivityLog, Repository};
use tvk_db::SharedStore;
use validator::Validate;

use super::content::Actor;

/// Input for joining as a member.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMemberInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 10, max = 15))]
    pub mobile: String,

    #[validate(length(min = 1, max = 100))]
    pub constituency: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,

    /// Avatar as an image data URL.
    pub avatar: Option<String>,
}

/// Contact channel a member has proven ownership of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationChannel {
    Email,
    Mobile,
}

/// Service for members and their profiles.
#[derive(Clone)]
pub struct MembershipService {
    users: Repository<User>,
    log: ActivityLog,
    id_gen: IdGenerator,
    image_policy: ImagePolicy,
}

impl MembershipService {
    /// Create a new membership service.
    #[must_use]
    pub fn new(store: SharedStore, log: ActivityLog, image_policy: ImagePolicy) -> Self {
        Self {
            users: Repository::new(store),
            log,
            id_gen: IdGenerator::new(),
            image_policy,
        }
    }

    /// Register a new member.
    pub async fn register_member(&self, input: RegisterMemberInput) -> AppResult<User> {
        input.validate()?;
        if !input.mobile.chars().all(|c| c.is_ascii_digit() || c == '+') {
            return Err(AppError::Validation(
                "Mobile number may contain only digits".to_string(),
            ));
        }
        if let Some(avatar) = input.avatar.as_deref() {
            validate_image(avatar, &self.image_policy)?;
        }

        let users = self.users.list().await?;
        if users.iter().any(|u| u.mobile.as_deref() == Some(input.mobile.as_str())) {
            return Err(AppError::Conflict("Mobile number is already registered".to_string()));
        }
        if let Some(email) = input.email.as_deref()
            && users.iter().any(|u| u.has_email(email))
        {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let mut membership_id = self.id_gen.generate_membership_id();
        while users
            .iter()
            .any(|u| u.membership_id.as_deref() == Some(membership_id.as_str()))
        {
            membership_id = self.id_gen.generate_membership_id();
        }

        let password_hash = input.password.as_deref().map(hash_password).transpose()?;
        let avatar = input
            .avatar
            .unwrap_or_else(|| default_avatar_url(&input.mobile));

        let user = self
            .users
            .create(NewUser {
                name: input.name.trim().to_string(),
                email: input.email.map(|e| e.trim().to_string()),
                role: UserRole::Member,
                membership_id: Some(membership_id),
                password_hash,
                avatar: Some(avatar),
                mobile: Some(input.mobile),
                constituency: Some(input.constituency.clone()),
                sso_provider: None,
                email_verified: false,
            })
            .await?;

        self.log
            .append(Actor::from(&user).log(
                TransactionType::Membership,
                format!("New membership registration from {}", input.constituency),
            ))
            .await?;

        tracing::info!(user_id = %user.id, membership_id = ?user.membership_id, "Member registered");
        Ok(user)
    }

    /// Replace a user's avatar with an uploaded image.
    pub async fn update_avatar(&self, user_id: &str, data_url: &str) -> AppResult<User> {
        validate_image(data_url, &self.image_policy)?;

        let user = self
            .modify(user_id, |user| user.avatar = Some(data_url.to_string()))
            .await?;

        self.log
            .append(Actor::from(&user).log(
                TransactionType::Membership,
                "Profile avatar updated successfully",
            ))
            .await?;

        Ok(user)
    }

    /// Record that a user verified a contact channel.
    pub async fn mark_verified(&self, user_id: &str, channel: VerificationChannel) -> AppResult<User> {
        let user = self
            .modify(user_id, |user| match channel {
                VerificationChannel::Email => user.email_verified = true,
                VerificationChannel::Mobile => user.mobile_verified = true,
            })
            .await?;

        tracing::info!(user_id = %user_id, channel = ?channel, "Contact verified");
        Ok(user)
    }

    /// All users in registration order.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn modify(&self, user_id: &str, change: impl FnOnce(&mut User)) -> AppResult<User> {
        let mut users = self.users.list().await?;
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Err(AppError::UserNotFound(user_id.to_string()));
        };
        change(user);
        let updated = user.clone();

        self.users.replace_all(&users).await?;
        Ok(updated)
    }
}

/// Placeholder avatar keyed on the mobile number.
#[must_use]
pub fn default_avatar_url(mobile: &str) -> String {
    format!("https://i.pravatar.cc/150?u={mobile}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvk_common::data_url::encode;
    use tvk_db::test_utils::seeded_store;

    fn policy() -> ImagePolicy {
        ImagePolicy::new(1024, vec!["image/png".to_string(), "image/jpeg".to_string()])
    }

    async fn setup() -> (MembershipService, ActivityLog) {
        let store = seeded_store().await;
        let log = ActivityLog::new(store.clone());
        (MembershipService::new(store, log.clone(), policy()), log)
    }

    fn input(mobile: &str) -> RegisterMemberInput {
        RegisterMemberInput {
            name: "Karthik".to_string(),
            mobile: mobile.to_string(),
            constituency: "Chennai Central".to_string(),
            email: None,
            password: None,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_register_member_defaults() {
        let (service, log) = setup().await;

        let user = service.register_member(input("9876543210")).await.unwrap();

        assert_eq!(user.role, UserRole::Member);
        assert_eq!(
            user.avatar.as_deref(),
            Some("https://i.pravatar.cc/150?u=9876543210")
        );
        let membership_id = user.membership_id.clone().unwrap();
        assert!(membership_id.starts_with("TVK-"));
        assert_eq!(membership_id.rsplit('-').next().unwrap().len(), 5);

        let entries = log.list().await.unwrap();
        assert_eq!(entries[0].kind, TransactionType::Membership);
        assert_eq!(
            entries[0].details,
            "New membership registration from Chennai Central"
        );
        assert_eq!(entries[0].user_id, user.id);
    }

    #[tokio::test]
    async fn test_register_member_rejects_duplicate_mobile() {
        let (service, _) = setup().await;
        service.register_member(input("9876543210")).await.unwrap();

        let err = service
            .register_member(input("9876543210"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[tokio::test]
    async fn test_register_member_validates_fields() {
        let (service, _) = setup().await;

        let err = service.register_member(input("123")).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let mut bad_email = input("9876543210");
        bad_email.email = Some("not-an-email".to_string());
        assert!(service.register_member(bad_email).await.is_err());

        let mut bad_avatar = input("9876543211");
        bad_avatar.avatar = Some(encode("application/pdf", b"%PDF"));
        assert!(service.register_member(bad_avatar).await.is_err());
    }

    #[tokio::test]
    async fn test_register_member_hashes_password() {
        let (service, _) = setup().await;
        let mut with_password = input("9876543210");
        with_password.password = Some("member-password".to_string());

        let user = service.register_member(with_password).await.unwrap();

        let hash = user.password_hash.unwrap();
        assert_ne!(hash, "member-password");
        assert!(tvk_common::verify_password("member-password", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_avatar() {
        let (service, _) = setup().await;
        let user = service.register_member(input("9876543210")).await.unwrap();
        let avatar = encode("image/png", &[0x89, 0x50, 0x4E, 0x47]);

        let updated = service.update_avatar(&user.id, &avatar).await.unwrap();
        assert_eq!(updated.avatar.as_deref(), Some(avatar.as_str()));

        let too_big = encode("image/png", &[0u8; 2048]);
        let err = service.update_avatar(&user.id, &too_big).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err = service.update_avatar("missing", &avatar).await.unwrap_err();
        assert_eq!(err.error_code(), "USER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_mark_verified() {
        let (service, _) = setup().await;
        let user = service.register_member(input("9876543210")).await.unwrap();
        assert!(!user.mobile_verified);

        let user = service
            .mark_verified(&user.id, VerificationChannel::Mobile)
            .await
            .unwrap();
        assert!(user.mobile_verified);
        assert!(!user.email_verified);
        assert_eq!(service.list_users().await.unwrap().len(), 2);
    }
}

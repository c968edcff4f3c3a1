//! Sign-in and account linking.

use serde::Deserialize;
use tvk_common::{AppError, AppResult, IdGenerator, hash_password, verify_password};
use tvk_db::entities::{NewUser, TransactionType, User, UserRole};
use tvk_db::repositories::{ActivityLog, Repository};
use tvk_db::SharedStore;
use validator::Validate;

use super::content::Actor;

/// Input for email/password sign-in.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInInput {
    #[validate(length(min = 1, max = 256))]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Identity asserted by a social sign-in provider.
#[derive(Debug, Deserialize, Validate)]
pub struct SsoInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 32))]
    pub provider: String,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    users: Repository<User>,
    log: ActivityLog,
    id_gen: IdGenerator,
}

impl AuthService {
    /// Create a new auth service.
    #[must_use]
    pub fn new(store: SharedStore, log: ActivityLog) -> Self {
        Self {
            users: Repository::new(store),
            log,
            id_gen: IdGenerator::new(),
        }
    }

    /// Check an email/password pair.
    ///
    /// The email is matched case-insensitively. Unknown emails, accounts
    /// without a password and wrong passwords all yield `None`.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let users = self.users.list().await?;

        let Some(user) = users.into_iter().find(|u| u.has_email(email)) else {
            tracing::debug!("Sign-in for unknown email");
            return Ok(None);
        };
        let Some(hash) = user.password_hash.as_deref() else {
            tracing::debug!(user_id = %user.id, "Sign-in for account without password");
            return Ok(None);
        };

        match verify_password(password, hash) {
            Ok(true) => {
                tracing::info!(user_id = %user.id, "User signed in");
                Ok(Some(user))
            }
            Ok(false) => Ok(None),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                Ok(None)
            }
        }
    }

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))
    }

    /// Link a social sign-in to an account.
    ///
    /// An existing user with the same email gets the provider attached;
    /// otherwise a new member without a password is created. Administrator
    /// accounts are `Forbidden` here and must use password sign-in.
    pub async fn upsert_sso_user(&self, input: SsoInput) -> AppResult<User> {
        input.validate()?;

        let mut users = self.users.list().await?;
        let user = if let Some(existing) = users.iter_mut().find(|u| u.has_email(&input.email)) {
            if existing.role == UserRole::Admin {
                tracing::warn!(
                    user_id = %existing.id,
                    provider = %input.provider,
                    "SSO refused for administrator"
                );
                return Err(AppError::Forbidden(
                    "Administrators must sign in with a password".to_string(),
                ));
            }
            existing.sso_provider = Some(input.provider.clone());
            let user = existing.clone();
            self.users.replace_all(&users).await?;
            user
        } else {
            self.users
                .create(NewUser {
                    name: input.name,
                    email: Some(input.email.trim().to_string()),
                    role: UserRole::Member,
                    membership_id: Some(self.id_gen.generate_membership_id()),
                    sso_provider: Some(input.provider.clone()),
                    email_verified: true,
                    ..Default::default()
                })
                .await?
        };

        self.log
            .append(Actor::from(&user).log(
                TransactionType::Auth,
                format!("Signed in with {}", input.provider),
            ))
            .await?;

        tracing::info!(user_id = %user.id, provider = %input.provider, "SSO user linked");
        Ok(user)
    }

    /// Set or reset a user's password.
    pub async fn set_password(&self, user_id: &str, password: &str) -> AppResult<()> {
        if password.chars().count() < 8 {
            return Err(AppError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        let hash = hash_password(password)?;

        let mut users = self.users.list().await?;
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Err(AppError::UserNotFound(user_id.to_string()));
        };
        user.password_hash = Some(hash);

        self.users.replace_all(&users).await?;
        tracing::info!(user_id = %user_id, "Password updated");
        Ok(())
    }
}

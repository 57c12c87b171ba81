use chrono::Duration;
use log::{debug, info};

use crate::auth::guard::Identity;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenManager;
use crate::config::{AdminAccount, Config};
use crate::error::AppError;
use crate::models::{NewUser, PasswordChange, Role, User};
use crate::repository::UserRepository;
use crate::validation::Valid;

/// Credential checks, password hashing and token issuance.
///
/// One instance is built at startup and shared through `web::Data`.
pub struct Authenticator {
    tokens: TokenManager,
    bcrypt_cost: u32,
}

impl Authenticator {
    pub fn new(secret: &str, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self {
            tokens: TokenManager::new(secret, token_ttl),
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::minutes(config.token_ttl_minutes),
            config.bcrypt_cost,
        )
    }

    /// Looks up `username` and checks `password` against the stored hash.
    ///
    /// Unknown users, wrong passwords and deactivated accounts all fail with the
    /// same `Unauthorized` error.
    pub async fn authenticate(
        &self,
        users: &UserRepository<'_>,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let invalid = || AppError::Unauthorized("Could not validate user.".into());

        let user = users.find_by_username(username).await?.ok_or_else(|| {
            debug!("Login attempt for unknown user {}", username);
            invalid()
        })?;

        if !user.is_active || !verify_password(password, &user.hashed_password)? {
            debug!("Rejected credentials for user {}", user.id);
            return Err(invalid());
        }
        Ok(user)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        self.tokens.issue(user)
    }

    pub fn verify_token(&self, token: &str) -> Result<Identity, AppError> {
        self.tokens.verify(token)
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        hash_password(password, self.bcrypt_cost)
    }

    /// Replaces the caller's password hash after checking the current password.
    ///
    /// The stored hash is left untouched when `change.password` does not verify.
    pub async fn change_password(
        &self,
        users: &UserRepository<'_>,
        identity: &Identity,
        change: &Valid<PasswordChange>,
    ) -> Result<(), AppError> {
        let user = users
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Authentication Failed".into()))?;

        if !verify_password(&change.password, &user.hashed_password)? {
            debug!("Password change for user {} rejected", user.id);
            return Err(AppError::Unauthorized("Error on password change".into()));
        }

        let hashed = self.hash_password(&change.new_password)?;
        users.update_password(user.id, &hashed).await?;
        info!("User {} changed their password", user.id);
        Ok(())
    }

    /// Creates the configured administrator unless the username already exists.
    pub async fn ensure_admin(
        &self,
        users: &UserRepository<'_>,
        account: &AdminAccount,
    ) -> Result<User, AppError> {
        if let Some(existing) = users.find_by_username(&account.username).await? {
            if existing.role != Role::Admin {
                log::warn!(
                    "Configured admin {} exists without the admin role",
                    account.username
                );
            }
            return Ok(existing);
        }

        let admin = users
            .create(&NewUser {
                username: account.username.clone(),
                email: account.email.clone(),
                first_name: "Admin".into(),
                last_name: "Account".into(),
                hashed_password: self.hash_password(&account.password)?,
                role: Role::Admin,
            })
            .await?;
        info!("Created admin account {}", admin.username);
        Ok(admin)
    }
}

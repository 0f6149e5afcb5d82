//! Auth business logic
//!
//! Sign-up and login orchestration, independent of the storage backend.

use chrono::{DateTime, Utc};

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::models::{NewUser, SignUpRequest, UserId};

use super::password::PasswordHasher;
use super::repository::UserRepository;
use super::token::TokenCodec;

/// Authentication service over a user repository
pub struct AuthService<R> {
    repo: R,
    hasher: PasswordHasher,
    tokens: TokenCodec,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: R, config: &AuthConfig) -> Self {
        Self {
            repo,
            hasher: PasswordHasher::new(config.password_salt.clone()),
            tokens: TokenCodec::new(&config.signing_key, config.token_ttl),
        }
    }

    #[cfg(test)]
    pub(crate) fn repo(&self) -> &R {
        &self.repo
    }

    /// Hash the password and persist the user
    pub async fn create_user(&self, request: SignUpRequest) -> Result<UserId> {
        let new_user = NewUser {
            name: request.name,
            password_hash: self.hasher.hash(&request.password),
            username: request.username,
        };

        let username = new_user.username.clone();
        let id = self.repo.create_user(new_user).await?;
        log::info!("Created user {} ({})", id, username);
        Ok(id)
    }

    /// Verify credentials and issue a token valid from now
    pub async fn issue_token(&self, username: &str, password: &str) -> Result<String> {
        self.issue_token_at(username, password, Utc::now()).await
    }

    /// Verify credentials and issue a token valid from `now`
    pub async fn issue_token_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let user = self
            .repo
            .get_user(username, &self.hasher.hash(password))
            .await?
            .ok_or(Error::InvalidCredentials)?;

        log::debug!("Issuing token for user {}", user.id);
        self.tokens.issue_at(user.id, now)
    }

    /// Verify a token and return the user it was issued to.
    ///
    /// The user row is not re-read: a token stays valid until it expires even
    /// if its user no longer exists.
    pub fn parse_token(&self, token: &str) -> Result<UserId> {
        self.parse_token_at(token, Utc::now())
    }

    pub fn parse_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId> {
        Ok(self.tokens.parse_at(token, now)?.user_id)
    }
}

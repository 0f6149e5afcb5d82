//! User repository
//!
//! Abstracts database operations for testability using trait-based dependency injection.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::{classify_user_insert, Result};
use crate::models::{NewUser, User, UserId};

/// User repository trait - abstracts database operations for testability
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; `DuplicateIdentity` if the username is taken
    async fn create_user(&self, user: NewUser) -> Result<UserId>;

    /// Find the user matching both username and password digest
    async fn get_user(&self, username: &str, password_hash: &str) -> Result<Option<User>>;
}

/// SQLite implementation of UserRepository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<UserId> {
        sqlx::query_scalar(
            "INSERT INTO users (name, username, password_hash) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_user_insert(e, &user.username))
    }

    async fn get_user(&self, username: &str, password_hash: &str) -> Result<Option<User>> {
        let user = sqlx::query_as(
            "SELECT id, name, username, password_hash FROM users WHERE username = ? AND password_hash = ?",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

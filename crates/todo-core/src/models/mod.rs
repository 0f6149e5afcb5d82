//! Data models for todo lists

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identity of a registered user
pub type UserId = i64;

/// User model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Sign-up request carrying the plaintext password
#[derive(Clone, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Data for persisting a new user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

/// Todo list model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TodoList {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Create todo list request
#[derive(Debug, Clone, Deserialize)]
pub struct NewTodoList {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Update todo list request
///
/// `None` leaves the stored column untouched; `Some` overwrites it, including
/// `Some(String::new())` to clear the description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Todo item model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub done: bool,
}

/// Create todo item request
#[derive(Debug, Clone, Deserialize)]
pub struct NewTodoItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Update todo item request
///
/// Presence is tracked per field: `Some(false)` for `done` is written, `None` is not.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

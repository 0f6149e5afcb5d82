//! Access facade
//!
//! The single entry point for outer layers. Every list and item operation
//! takes the caller's user id, which should come from `authorize` or
//! `parse_token` and never from request data.

use serde::Serialize;

use crate::auth::{AuthService, SqliteUserRepository, UserRepository};
use crate::config::AuthConfig;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{
    NewTodoItem, NewTodoList, SignUpRequest, TodoItem, TodoList, UpdateItemInput,
    UpdateListInput, UserId,
};
use crate::repository::{
    SqliteTodoItemRepository, SqliteTodoListRepository, TodoItemRepository, TodoListRepository,
};

const BEARER_SCHEME: &str = "bearer";

/// Error shape shown to users: a status code and a fixed message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicError {
    pub status: u16,
    pub message: &'static str,
}

impl From<&Error> for PublicError {
    fn from(err: &Error) -> Self {
        Self {
            status: err.status().code(),
            message: err.public_message(),
        }
    }
}

impl std::fmt::Display for PublicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

/// Facade over the authentication service and both repositories
pub struct Access<
    U = SqliteUserRepository,
    L = SqliteTodoListRepository,
    I = SqliteTodoItemRepository,
> {
    auth: AuthService<U>,
    lists: L,
    items: I,
}

impl Access {
    /// Wire the SQLite repositories to an open database
    pub fn new(db: &Database, config: &AuthConfig) -> Self {
        Self::from_parts(
            SqliteUserRepository::new(db.pool.clone()),
            SqliteTodoListRepository::new(db.pool.clone()),
            SqliteTodoItemRepository::new(db.pool.clone()),
            config,
        )
    }
}

impl<U, L, I> Access<U, L, I>
where
    U: UserRepository,
    L: TodoListRepository,
    I: TodoItemRepository,
{
    pub fn from_parts(users: U, lists: L, items: I, config: &AuthConfig) -> Self {
        Self {
            auth: AuthService::new(users, config),
            lists,
            items,
        }
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    pub async fn create_user(&self, request: SignUpRequest) -> Result<UserId> {
        self.auth.create_user(request).await
    }

    pub async fn issue_token(&self, username: &str, password: &str) -> Result<String> {
        self.auth.issue_token(username, password).await
    }

    pub fn parse_token(&self, token: &str) -> Result<UserId> {
        self.auth.parse_token(token)
    }

    /// Resolve an `Authorization` header value of the form `Bearer <token>`
    pub fn authorize(&self, header: &str) -> Result<UserId> {
        let token = bearer_token(header)?;
        self.auth.parse_token(token)
    }

    // ========================================================================
    // Lists
    // ========================================================================

    pub async fn create_list(&self, user_id: UserId, list: NewTodoList) -> Result<i64> {
        self.lists.create(user_id, list).await
    }

    pub async fn get_all_lists(&self, user_id: UserId) -> Result<Vec<TodoList>> {
        self.lists.get_all(user_id).await
    }

    pub async fn get_list(&self, user_id: UserId, list_id: i64) -> Result<TodoList> {
        self.lists.get_by_id(user_id, list_id).await
    }

    pub async fn delete_list(&self, user_id: UserId, list_id: i64) -> Result<()> {
        self.lists.delete(user_id, list_id).await
    }

    pub async fn update_list(
        &self,
        user_id: UserId,
        list_id: i64,
        input: UpdateListInput,
    ) -> Result<()> {
        self.lists.update(user_id, list_id, input).await
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Add an item to one of the caller's lists; `NotFound` if the list is not theirs
    pub async fn create_item(
        &self,
        user_id: UserId,
        list_id: i64,
        item: NewTodoItem,
    ) -> Result<i64> {
        self.lists.get_by_id(user_id, list_id).await?;
        self.items.create(list_id, item).await
    }

    pub async fn get_all_items(&self, user_id: UserId, list_id: i64) -> Result<Vec<TodoItem>> {
        self.items.get_all(user_id, list_id).await
    }

    pub async fn get_item(&self, user_id: UserId, item_id: i64) -> Result<TodoItem> {
        self.items.get_by_id(user_id, item_id).await
    }

    pub async fn delete_item(&self, user_id: UserId, item_id: i64) -> Result<()> {
        self.items.delete(user_id, item_id).await
    }

    pub async fn update_item(
        &self,
        user_id: UserId,
        item_id: i64,
        input: UpdateItemInput,
    ) -> Result<()> {
        self.items.update(user_id, item_id, input).await
    }
}

/// Extract the token from `Bearer <token>`; the scheme is case-insensitive
fn bearer_token(header: &str) -> Result<&str> {
    let header = header.trim();
    if header.is_empty() {
        return Err(Error::malformed("empty authorization header"));
    }

    let (scheme, token) = header
        .split_once(char::is_whitespace)
        .ok_or_else(|| Error::malformed("missing bearer token"))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::malformed("unsupported authorization scheme"));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::malformed("missing bearer token"));
    }
    Ok(token)
}

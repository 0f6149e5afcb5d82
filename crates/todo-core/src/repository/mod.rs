//! Ownership-scoped repositories for lists and items
//!
//! ## Structure
//! - `scope.rs` - Ownership predicates composed into every statement
//! - `query_builder.rs` - Parameterized statement builder
//! - `lists.rs` - TodoListRepository trait and SQLite implementation
//! - `items.rs` - TodoItemRepository trait and SQLite implementation

pub mod items;
pub mod lists;
pub mod query_builder;
pub mod scope;

pub use items::{SqliteTodoItemRepository, TodoItemRepository};
pub use lists::{SqliteTodoListRepository, TodoListRepository};
pub use scope::{ItemScope, ListScope};

use sqlx::{Sqlite, Transaction};

use crate::error::Error;

/// Roll back a failed multi-row write and report the statement error
pub(crate) async fn abort(tx: Transaction<'_, Sqlite>, err: sqlx::Error) -> Error {
    if let Err(rollback_err) = tx.rollback().await {
        log::warn!("Rollback failed: {}", rollback_err);
    }
    Error::Persistence(err)
}

//! # todo-core
//!
//! Ownership-scoped access layer for todo lists - shared by every outer surface.
//!
//! This crate provides:
//! - Authentication: password digests, signed tokens, sign-up/sign-in (`auth` module)
//! - Ownership-scoped list and item repositories (`repository` module)
//! - The facade outer layers call (`access` module)
//! - Database bootstrap (`db` module)
//! - Configuration (`config` module)
//! - Unified error handling (`error` module)

pub mod access;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;

// Re-exports for convenience
pub use access::{Access, PublicError};
pub use config::AuthConfig;
pub use db::Database;
pub use error::{Error, Result, Status};

pub use models::{
    NewTodoItem, NewTodoList, SignUpRequest, TodoItem, TodoList, UpdateItemInput,
    UpdateListInput, User, UserId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}

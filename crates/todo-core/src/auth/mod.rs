//! Auth module
//!
//! Authentication operations using trait-based dependency injection for testability.
//!
//! ## Structure
//! - `password.rs` - Salted, deterministic password digests
//! - `token.rs` - Signed bearer token codec
//! - `repository.rs` - UserRepository trait and SQLite implementation
//! - `service.rs` - Sign-up and login logic (testable, storage-independent)

pub mod password;
pub mod repository;
pub mod service;
pub mod token;


pub use password::PasswordHasher;
pub use repository::{SqliteUserRepository, UserRepository};
pub use service::AuthService;
pub use token::{Claims, TokenCodec};

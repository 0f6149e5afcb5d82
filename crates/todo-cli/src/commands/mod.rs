//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod auth;
pub mod item;
pub mod list;

use anyhow::{Context as _, Result};
use todo_core::{Access, UserId};

use crate::output::Printer;

/// Shared context for all commands
pub struct Context {
    pub access: Access,
    pub out: Printer,
    pub token: Option<String>,
}

impl Context {
    /// Resolve the acting user from the bearer token
    pub fn user_id(&self) -> Result<UserId> {
        let token = self
            .token
            .as_deref()
            .context("Not signed in: pass --token or set TODO_TOKEN")?;
        Ok(self.access.parse_token(token)?)
    }
}

//! Auth commands
//!
//! Sign up a new user and sign in to obtain a bearer token.

use anyhow::Result;
use clap::Subcommand;
use todo_core::SignUpRequest;

use super::Context;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create a new user
    SignUp {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Unique login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Sign in and print a bearer token
    SignIn {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
}

pub async fn execute(ctx: &Context, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::SignUp { name, username, password } => {
            sign_up(ctx, name, username, password).await
        }
        AuthAction::SignIn { username, password } => sign_in(ctx, username, password).await,
    }
}

async fn sign_up(ctx: &Context, name: String, username: String, password: String) -> Result<()> {
    let id = ctx
        .access
        .create_user(SignUpRequest {
            name,
            username: username.clone(),
            password,
        })
        .await?;

    ctx.out.note(&format!("Created user {} ({})", username, id));
    Ok(())
}

async fn sign_in(ctx: &Context, username: String, password: String) -> Result<()> {
    let token = ctx.access.issue_token(&username, &password).await?;
    ctx.out.token(&username, &token)
}

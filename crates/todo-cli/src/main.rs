//! Todo CLI - private todo lists from the command line
//!
//! A command-line interface for signing up, signing in and managing
//! lists and items that only their owner can see.

mod commands;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use todo_core::{Access, AuthConfig, PublicError};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "Private todo lists CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, value_enum, default_value_t = output::OutputFormat::Table)]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Override database path (or set TODO_DB_PATH env var)
    #[arg(long, env = "TODO_DB_PATH", global = true)]
    db: Option<String>,

    /// Bearer token from `auth sign-in` (or set TODO_TOKEN env var)
    #[arg(long, env = "TODO_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign up and sign in
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },

    /// Manage your lists
    List {
        #[command(subcommand)]
        action: commands::list::ListAction,
    },

    /// Manage the items of your lists
    Item {
        #[command(subcommand)]
        action: commands::item::ItemAction,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Set up database path if provided
    if let Some(db_path) = &cli.db {
        std::env::set_var(todo_core::db::DB_PATH_ENV, db_path);
    }

    let config = AuthConfig::from_env()?;
    let db = todo_core::Database::new().await?;

    // Create context for commands
    let ctx = commands::Context {
        access: Access::new(&db, &config),
        out: output::Printer::new(cli.format, cli.quiet),
        token: cli.token,
    };

    // Execute command
    match cli.command {
        Commands::Auth { action } => commands::auth::execute(&ctx, action).await,
        Commands::List { action } => commands::list::execute(&ctx, action).await,
        Commands::Item { action } => commands::item::execute(&ctx, action).await,
    }
}

/// Show core failures by their public message only; local setup problems in full
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<todo_core::Error>() {
        Some(core_err) if matches!(core_err, todo_core::Error::Config(_)) => {
            output::print_error(&format!("Error: {}", core_err));
        }
        Some(core_err) => {
            log::debug!("{}", core_err);
            output::print_error(&format!("Error: {}", PublicError::from(core_err).message));
        }
        None => output::print_error(&format!("Error: {:#}", err)),
    }
}

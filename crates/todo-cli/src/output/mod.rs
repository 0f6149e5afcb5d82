//! Output for list and item commands
//!
//! Every command prints through a `Printer`, which knows the chosen format and
//! whether progress chatter is wanted. Records describe themselves with the
//! `Record` trait so empty results and creations read per entity.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// `--format` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// A row the CLI can show as a table line or a JSON object
pub trait Record: Serialize + Tabled {
    /// Singular noun, as in "Created list 3"
    const NOUN: &'static str;
    /// Shown instead of an empty table
    const EMPTY: &'static str;
}

#[derive(Serialize)]
struct CreatedId {
    id: i64,
}

#[derive(Serialize)]
struct IssuedToken<'a> {
    token: &'a str,
}

pub struct Printer {
    format: OutputFormat,
    quiet: bool,
}

impl Printer {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// All records of one kind; an empty table becomes the record's EMPTY line
    pub fn records<R: Record>(&self, records: &[R]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
            OutputFormat::Table if records.is_empty() => println!("{}", R::EMPTY),
            OutputFormat::Table => println!("{}", Table::new(records)),
        }
        Ok(())
    }

    pub fn record<R: Record>(&self, record: &R) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
            OutputFormat::Table => println!("{}", Table::new([record])),
        }
        Ok(())
    }

    /// A new record's id; quiet table mode prints the bare id for scripting
    pub fn created<R: Record>(&self, id: i64) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&CreatedId { id })?)
            }
            OutputFormat::Table if self.quiet => println!("{}", id),
            OutputFormat::Table => println!("{}", format!("Created {} {}", R::NOUN, id).green()),
        }
        Ok(())
    }

    /// A freshly issued bearer token; quiet table mode prints only the token
    pub fn token(&self, username: &str, token: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&IssuedToken { token })?)
            }
            OutputFormat::Table => {
                self.note(&format!("Signed in as {}. Export the token as TODO_TOKEN:", username));
                println!("{}", token);
            }
        }
        Ok(())
    }

    /// Confirmation line, silenced by --quiet
    pub fn note(&self, message: &str) {
        if !self.quiet {
            println!("{}", message.green());
        }
    }
}

pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

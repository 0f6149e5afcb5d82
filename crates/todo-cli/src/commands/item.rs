//! Item commands
//!
//! Add, show, update and delete items inside the signed-in user's lists.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;
use todo_core::{NewTodoItem, TodoItem, UpdateItemInput};

use super::Context;
use crate::output::Record;

#[derive(Subcommand)]
pub enum ItemAction {
    /// Add an item to a list
    Add {
        /// List ID
        list_id: i64,

        /// Item title
        #[arg(short, long)]
        title: String,

        /// Description
        #[arg(short = 'D', long, default_value = "")]
        description: String,
    },

    /// Show the items of a list
    Ls {
        /// List ID
        list_id: i64,
    },

    /// Show one item
    Show {
        /// Item ID
        id: i64,
    },

    /// Delete an item
    Rm {
        /// Item ID
        id: i64,
    },

    /// Update an item; omitted fields are left unchanged
    Update {
        /// Item ID
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description (pass "" to clear it)
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Completion flag: true or false
        #[arg(long)]
        done: Option<bool>,
    },
}

/// Item row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ItemRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Done")]
    pub done: bool,
}

impl From<TodoItem> for ItemRow {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            done: item.done,
        }
    }
}

impl Record for ItemRow {
    const NOUN: &'static str = "item";
    const EMPTY: &'static str = "No items yet.";
}

pub async fn execute(ctx: &Context, action: ItemAction) -> Result<()> {
    let user_id = ctx.user_id()?;

    match action {
        ItemAction::Add { list_id, title, description } => {
            let id = ctx
                .access
                .create_item(user_id, list_id, NewTodoItem { title, description })
                .await?;
            ctx.out.created::<ItemRow>(id)
        }
        ItemAction::Ls { list_id } => {
            let rows: Vec<ItemRow> = ctx
                .access
                .get_all_items(user_id, list_id)
                .await?
                .into_iter()
                .map(ItemRow::from)
                .collect();
            ctx.out.records(&rows)
        }
        ItemAction::Show { id } => {
            let item = ctx.access.get_item(user_id, id).await?;
            ctx.out.record(&ItemRow::from(item))
        }
        ItemAction::Rm { id } => {
            ctx.access.delete_item(user_id, id).await?;
            ctx.out.note(&format!("Deleted item {}", id));
            Ok(())
        }
        ItemAction::Update { id, title, description, done } => {
            ctx.access
                .update_item(user_id, id, UpdateItemInput { title, description, done })
                .await?;
            ctx.out.note(&format!("Updated item {}", id));
            Ok(())
        }
    }
}

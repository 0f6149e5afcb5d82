//! List commands
//!
//! Create, show, update and delete the signed-in user's lists.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;
use todo_core::{NewTodoList, TodoList, UpdateListInput};

use super::Context;
use crate::output::Record;

#[derive(Subcommand)]
pub enum ListAction {
    /// Create a new list
    Create {
        /// List title
        #[arg(short, long)]
        title: String,

        /// Description
        #[arg(short = 'D', long, default_value = "")]
        description: String,
    },

    /// Show all your lists
    Ls,

    /// Show one list
    Show {
        /// List ID
        id: i64,
    },

    /// Delete a list
    Rm {
        /// List ID
        id: i64,
    },

    /// Update a list; omitted fields are left unchanged
    Update {
        /// List ID
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description (pass "" to clear it)
        #[arg(short = 'D', long)]
        description: Option<String>,
    },
}

/// List row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ListRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<TodoList> for ListRow {
    fn from(list: TodoList) -> Self {
        Self {
            id: list.id,
            title: list.title,
            description: list.description,
        }
    }
}

impl Record for ListRow {
    const NOUN: &'static str = "list";
    const EMPTY: &'static str = "No lists yet.";
}

pub async fn execute(ctx: &Context, action: ListAction) -> Result<()> {
    let user_id = ctx.user_id()?;

    match action {
        ListAction::Create { title, description } => {
            let id = ctx
                .access
                .create_list(user_id, NewTodoList { title, description })
                .await?;
            ctx.out.created::<ListRow>(id)
        }
        ListAction::Ls => {
            let rows: Vec<ListRow> = ctx
                .access
                .get_all_lists(user_id)
                .await?
                .into_iter()
                .map(ListRow::from)
                .collect();
            ctx.out.records(&rows)
        }
        ListAction::Show { id } => {
            let list = ctx.access.get_list(user_id, id).await?;
            ctx.out.record(&ListRow::from(list))
        }
        ListAction::Rm { id } => {
            ctx.access.delete_list(user_id, id).await?;
            ctx.out.note(&format!("Deleted list {}", id));
            Ok(())
        }
        ListAction::Update { id, title, description } => {
            ctx.access
                .update_list(user_id, id, UpdateListInput { title, description })
                .await?;
            ctx.out.note(&format!("Updated list {}", id));
            Ok(())
        }
    }
}

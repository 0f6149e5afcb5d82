//! Todo list repository
//!
//! Lists are only reachable through the caller's `users_lists` rows.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::abort;
use super::query_builder::{BindValue, SafeQueryBuilder};
use super::scope::ListScope;
use crate::error::{Error, Result};
use crate::models::{NewTodoList, TodoList, UpdateListInput, UserId};

const SELECT_LISTS: &str = "SELECT tl.id, tl.title, tl.description FROM todo_lists tl";

/// Todo list repository trait
#[async_trait]
pub trait TodoListRepository: Send + Sync {
    /// Insert the list and its membership row in one transaction
    async fn create(&self, user_id: UserId, list: NewTodoList) -> Result<i64>;

    async fn get_all(&self, user_id: UserId) -> Result<Vec<TodoList>>;

    /// `NotFound` when the list is missing or owned by someone else
    async fn get_by_id(&self, user_id: UserId, list_id: i64) -> Result<TodoList>;

    async fn delete(&self, user_id: UserId, list_id: i64) -> Result<()>;

    /// Overwrite only the fields present in `input`
    async fn update(&self, user_id: UserId, list_id: i64, input: UpdateListInput) -> Result<()>;
}

/// SQLite implementation of TodoListRepository
#[derive(Clone)]
pub struct SqliteTodoListRepository {
    pool: SqlitePool,
}

impl SqliteTodoListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn owned_list(user_id: UserId, list_id: i64, id_column: &str) -> SafeQueryBuilder {
    let mut builder = SafeQueryBuilder::new();
    builder.add_int_condition(id_column, "=", list_id);
    ListScope::new(user_id).apply(&mut builder, id_column);
    builder
}

/// Build the ownership-filtered UPDATE; SET terms follow the order title, description
pub(crate) fn update_statement(
    user_id: UserId,
    list_id: i64,
    input: UpdateListInput,
) -> SafeQueryBuilder {
    let mut builder = owned_list(user_id, list_id, "id");
    if let Some(title) = input.title {
        builder.add_assignment("title", BindValue::Text(title));
    }
    if let Some(description) = input.description {
        builder.add_assignment("description", BindValue::Text(description));
    }
    builder
}

#[async_trait]
impl TodoListRepository for SqliteTodoListRepository {
    async fn create(&self, user_id: UserId, list: NewTodoList) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_scalar::<_, i64>(
            "INSERT INTO todo_lists (title, description) VALUES (?, ?) RETURNING id",
        )
        .bind(&list.title)
        .bind(&list.description)
        .fetch_one(&mut *tx)
        .await;
        let list_id = match inserted {
            Ok(id) => id,
            Err(e) => return Err(abort(tx, e).await),
        };

        let linked = sqlx::query("INSERT INTO users_lists (user_id, list_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(list_id)
            .execute(&mut *tx)
            .await;
        if let Err(e) = linked {
            return Err(abort(tx, e).await);
        }

        tx.commit().await?;
        log::debug!("Created list {} for user {}", list_id, user_id);
        Ok(list_id)
    }

    async fn get_all(&self, user_id: UserId) -> Result<Vec<TodoList>> {
        let mut builder = SafeQueryBuilder::new();
        ListScope::new(user_id).apply(&mut builder, "tl.id");
        builder
            .fetch_all(&self.pool, SELECT_LISTS, "ORDER BY tl.id")
            .await
    }

    async fn get_by_id(&self, user_id: UserId, list_id: i64) -> Result<TodoList> {
        owned_list(user_id, list_id, "tl.id")
            .fetch_optional(&self.pool, SELECT_LISTS)
            .await?
            .ok_or_else(|| Error::not_found(format!("list {}", list_id)))
    }

    async fn delete(&self, user_id: UserId, list_id: i64) -> Result<()> {
        let affected = owned_list(user_id, list_id, "id")
            .execute_delete(&self.pool, "todo_lists")
            .await?;
        if affected == 0 {
            return Err(Error::not_found(format!("list {}", list_id)));
        }
        log::debug!("Deleted list {} for user {}", list_id, user_id);
        Ok(())
    }

    async fn update(&self, user_id: UserId, list_id: i64, input: UpdateListInput) -> Result<()> {
        let affected = update_statement(user_id, list_id, input)
            .execute_update(&self.pool, "todo_lists")
            .await?;
        if affected == 0 {
            return Err(Error::not_found(format!("list {}", list_id)));
        }
        Ok(())
    }
}

//! Todo item repository
//!
//! Items are reached through two links: `users_lists` then `lists_items`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::abort;
use super::query_builder::{BindValue, SafeQueryBuilder};
use super::scope::ItemScope;
use crate::error::{Error, Result};
use crate::models::{NewTodoItem, TodoItem, UpdateItemInput, UserId};

const SELECT_ITEMS: &str = "SELECT ti.id, ti.title, ti.description, ti.done FROM todo_items ti";

/// Todo item repository trait
#[async_trait]
pub trait TodoItemRepository: Send + Sync {
    /// Insert the item and its link row in one transaction.
    ///
    /// The caller must have checked that `list_id` belongs to the acting user;
    /// this method does not.
    async fn create(&self, list_id: i64, item: NewTodoItem) -> Result<i64>;

    async fn get_all(&self, user_id: UserId, list_id: i64) -> Result<Vec<TodoItem>>;

    async fn get_by_id(&self, user_id: UserId, item_id: i64) -> Result<TodoItem>;

    async fn delete(&self, user_id: UserId, item_id: i64) -> Result<()>;

    async fn update(&self, user_id: UserId, item_id: i64, input: UpdateItemInput) -> Result<()>;
}

/// SQLite implementation of TodoItemRepository
#[derive(Clone)]
pub struct SqliteTodoItemRepository {
    pool: SqlitePool,
}

impl SqliteTodoItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn owned_item(user_id: UserId, item_id: i64, id_column: &str) -> SafeQueryBuilder {
    let mut builder = SafeQueryBuilder::new();
    builder.add_int_condition(id_column, "=", item_id);
    ItemScope::new(user_id).apply(&mut builder, id_column);
    builder
}

/// SET terms follow the order title, description, done
pub(crate) fn update_statement(
    user_id: UserId,
    item_id: i64,
    input: UpdateItemInput,
) -> SafeQueryBuilder {
    let mut builder = owned_item(user_id, item_id, "id");
    if let Some(title) = input.title {
        builder.add_assignment("title", BindValue::Text(title));
    }
    if let Some(description) = input.description {
        builder.add_assignment("description", BindValue::Text(description));
    }
    if let Some(done) = input.done {
        builder.add_assignment("done", BindValue::Bool(done));
    }
    builder
}

#[async_trait]
impl TodoItemRepository for SqliteTodoItemRepository {
    async fn create(&self, list_id: i64, item: NewTodoItem) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_scalar::<_, i64>(
            "INSERT INTO todo_items (title, description) VALUES (?, ?) RETURNING id",
        )
        .bind(&item.title)
        .bind(&item.description)
        .fetch_one(&mut *tx)
        .await;
        let item_id = match inserted {
            Ok(id) => id,
            Err(e) => return Err(abort(tx, e).await),
        };

        let linked = sqlx::query("INSERT INTO lists_items (list_id, item_id) VALUES (?, ?)")
            .bind(list_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await;
        if let Err(e) = linked {
            return Err(abort(tx, e).await);
        }

        tx.commit().await?;
        log::debug!("Created item {} in list {}", item_id, list_id);
        Ok(item_id)
    }

    async fn get_all(&self, user_id: UserId, list_id: i64) -> Result<Vec<TodoItem>> {
        let mut builder = SafeQueryBuilder::new();
        ItemScope::in_list(user_id, list_id).apply(&mut builder, "ti.id");
        builder
            .fetch_all(&self.pool, SELECT_ITEMS, "ORDER BY ti.id")
            .await
    }

    async fn get_by_id(&self, user_id: UserId, item_id: i64) -> Result<TodoItem> {
        owned_item(user_id, item_id, "ti.id")
            .fetch_optional(&self.pool, SELECT_ITEMS)
            .await?
            .ok_or_else(|| Error::not_found(format!("item {}", item_id)))
    }

    async fn delete(&self, user_id: UserId, item_id: i64) -> Result<()> {
        let affected = owned_item(user_id, item_id, "id")
            .execute_delete(&self.pool, "todo_items")
            .await?;
        if affected == 0 {
            return Err(Error::not_found(format!("item {}", item_id)));
        }
        log::debug!("Deleted item {} for user {}", item_id, user_id);
        Ok(())
    }

    async fn update(&self, user_id: UserId, item_id: i64, input: UpdateItemInput) -> Result<()> {
        let affected = update_statement(user_id, item_id, input)
            .execute_update(&self.pool, "todo_items")
            .await?;
        if affected == 0 {
            return Err(Error::not_found(format!("item {}", item_id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use tempfile::TempDir;

    // ========================================================================
    // Statement Tests
    // ========================================================================

    #[test]
    fn test_update_statement_field_order() {
        let input = UpdateItemInput {
            title: Some("bread".to_string()),
            description: Some("rye".to_string()),
            done: Some(true),
        };
        let builder = update_statement(1, 2, input);

        assert_eq!(builder.build_set_clause(), "title = ?, description = ?, done = ?");
        let values: Vec<BindValue> = builder.bindings().cloned().collect();
        assert_eq!(
            &values[..3],
            &[
                BindValue::Text("bread".to_string()),
                BindValue::Text("rye".to_string()),
                BindValue::Bool(true),
            ]
        );
        assert_eq!(&values[3..], &[BindValue::Int(2), BindValue::Int(1)]);
    }

    #[test]
    fn test_update_statement_keeps_false_done() {
        let input = UpdateItemInput {
            done: Some(false),
            ..Default::default()
        };
        let builder = update_statement(1, 2, input);

        assert_eq!(builder.build_set_clause(), "done = ?");
        assert_eq!(builder.bindings().next(), Some(&BindValue::Bool(false)));
    }

    #[test]
    fn test_update_statement_scoped_through_both_links() {
        let builder = update_statement(1, 2, UpdateItemInput::default());
        let sql = builder.update_sql("todo_items");

        assert!(sql.starts_with("UPDATE todo_items SET id = id WHERE id = ? AND id IN ("));
        assert!(sql.contains("lists_items li"));
        assert!(sql.contains("users_lists ul"));
    }

    // ========================================================================
    // Database Tests
    // ========================================================================

    struct Fixture {
        repo: SqliteTodoItemRepository,
        pool: SqlitePool,
        _dir: TempDir,
    }

    async fn setup() -> Fixture {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("test.db"))
            .await
            .expect("Failed to create test database");
        Fixture {
            repo: SqliteTodoItemRepository::new(db.pool.clone()),
            pool: db.pool,
            _dir: dir,
        }
    }

    /// Insert a user owning one list, returning (user_id, list_id)
    async fn owner_with_list(pool: &SqlitePool, username: &str) -> (UserId, i64) {
        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, username, password_hash) VALUES (?, ?, 'digest') RETURNING id",
        )
        .bind(username)
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap();
        let list_id: i64 =
            sqlx::query_scalar("INSERT INTO todo_lists (title) VALUES ('list') RETURNING id")
                .fetch_one(pool)
                .await
                .unwrap();
        sqlx::query("INSERT INTO users_lists (user_id, list_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(list_id)
            .execute(pool)
            .await
            .unwrap();
        (user_id, list_id)
    }

    fn new_item(title: &str) -> NewTodoItem {
        NewTodoItem {
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_defaults_done_to_false() {
        let fx = setup().await;
        let (alice, list) = owner_with_list(&fx.pool, "alice").await;

        let id = fx.repo.create(list, new_item("milk")).await.unwrap();
        let item = fx.repo.get_by_id(alice, id).await.unwrap();

        assert_eq!(item.title, "milk");
        assert!(!item.done);
    }

    #[tokio::test]
    async fn test_get_all_filters_by_list() {
        let fx = setup().await;
        let (alice, list_a) = owner_with_list(&fx.pool, "alice").await;
        let list_b: i64 =
            sqlx::query_scalar("INSERT INTO todo_lists (title) VALUES ('other') RETURNING id")
                .fetch_one(&fx.pool)
                .await
                .unwrap();
        sqlx::query("INSERT INTO users_lists (user_id, list_id) VALUES (?, ?)")
            .bind(alice)
            .bind(list_b)
            .execute(&fx.pool)
            .await
            .unwrap();

        fx.repo.create(list_a, new_item("milk")).await.unwrap();
        fx.repo.create(list_b, new_item("nails")).await.unwrap();
        fx.repo.create(list_a, new_item("eggs")).await.unwrap();

        let titles: Vec<String> = fx
            .repo
            .get_all(alice, list_a)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["milk", "eggs"]);
    }

    #[tokio::test]
    async fn test_foreign_user_sees_nothing() {
        let fx = setup().await;
        let (_alice, list) = owner_with_list(&fx.pool, "alice").await;
        let (bob, _) = owner_with_list(&fx.pool, "bob").await;
        let id = fx.repo.create(list, new_item("milk")).await.unwrap();

        assert!(fx.repo.get_all(bob, list).await.unwrap().is_empty());
        assert!(matches!(fx.repo.get_by_id(bob, id).await, Err(Error::NotFound(_))));
        assert!(matches!(fx.repo.delete(bob, id).await, Err(Error::NotFound(_))));
        let result = fx
            .repo
            .update(
                bob,
                id,
                UpdateItemInput {
                    done: Some(true),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_done_only() {
        let fx = setup().await;
        let (alice, list) = owner_with_list(&fx.pool, "alice").await;
        let id = fx
            .repo
            .create(
                list,
                NewTodoItem {
                    title: "milk".to_string(),
                    description: "2 liters".to_string(),
                },
            )
            .await
            .unwrap();

        fx.repo
            .update(
                alice,
                id,
                UpdateItemInput {
                    done: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let item = fx.repo.get_by_id(alice, id).await.unwrap();
        assert_eq!(item.title, "milk");
        assert_eq!(item.description, "2 liters");
        assert!(item.done);
    }

    #[tokio::test]
    async fn test_update_done_back_to_false() {
        let fx = setup().await;
        let (alice, list) = owner_with_list(&fx.pool, "alice").await;
        let id = fx.repo.create(list, new_item("milk")).await.unwrap();

        let done = |value| UpdateItemInput {
            done: Some(value),
            ..Default::default()
        };
        fx.repo.update(alice, id, done(true)).await.unwrap();
        fx.repo.update(alice, id, done(false)).await.unwrap();

        assert!(!fx.repo.get_by_id(alice, id).await.unwrap().done);
    }

    #[tokio::test]
    async fn test_delete_removes_item_and_link() {
        let fx = setup().await;
        let (alice, list) = owner_with_list(&fx.pool, "alice").await;
        let id = fx.repo.create(list, new_item("milk")).await.unwrap();

        fx.repo.delete(alice, id).await.unwrap();

        assert!(matches!(fx.repo.get_by_id(alice, id).await, Err(Error::NotFound(_))));
        let links: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lists_items")
            .fetch_one(&fx.pool)
            .await
            .unwrap();
        assert_eq!(links.0, 0);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let fx = setup().await;
        let (alice, list) = owner_with_list(&fx.pool, "alice").await;
        let id = fx.repo.create(list, new_item("milk")).await.unwrap();

        fx.repo.delete(alice, id).await.unwrap();
        assert!(matches!(fx.repo.delete(alice, id).await, Err(Error::NotFound(_))));
    }
}

//! Safe SQL statement builder
//!
//! Helper for building parameterized UPDATE/DELETE/SELECT statements safely
//! (prevents SQL injection). Column names come from code; values are always bound.

use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};

use crate::error::Result;

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

macro_rules! bind_all {
    ($query:expr, $values:expr) => {{
        let mut query = $query;
        for value in $values {
            query = match value {
                BindValue::Text(s) => query.bind(s.clone()),
                BindValue::Int(i) => query.bind(*i),
                BindValue::Bool(b) => query.bind(*b),
            };
        }
        query
    }};
}

/// Statement builder that keeps SET and WHERE fragments in insertion order
pub struct SafeQueryBuilder {
    assignments: Vec<String>,
    assignment_bindings: Vec<BindValue>,
    conditions: Vec<String>,
    condition_bindings: Vec<BindValue>,
}

impl SafeQueryBuilder {
    pub fn new() -> Self {
        Self {
            assignments: Vec::new(),
            assignment_bindings: Vec::new(),
            conditions: Vec::new(),
            condition_bindings: Vec::new(),
        }
    }

    /// Add `column = ?` to the SET clause
    pub fn add_assignment(&mut self, column: &str, value: BindValue) {
        self.assignments.push(format!("{} = ?", column));
        self.assignment_bindings.push(value);
    }

    /// Add a condition with an integer value
    pub fn add_int_condition(&mut self, column: &str, op: &str, value: i64) {
        self.conditions.push(format!("{} {} ?", column, op));
        self.condition_bindings.push(BindValue::Int(value));
    }

    /// Add a raw SQL condition together with the values for its placeholders.
    /// Safety: Caller must ensure no user input is interpolated into the SQL string.
    pub fn add_raw_condition(&mut self, condition: &str, bindings: Vec<BindValue>) {
        self.conditions.push(condition.to_string());
        self.condition_bindings.extend(bindings);
    }

    /// Build the SET clause; with nothing to assign, `id = id` keeps the statement valid
    /// and leaves the row as it was
    pub fn build_set_clause(&self) -> String {
        if self.assignments.is_empty() {
            "id = id".to_string()
        } else {
            self.assignments.join(", ")
        }
    }

    /// Build the WHERE clause
    pub fn build_where_clause(&self) -> String {
        if self.conditions.is_empty() {
            "1=1".to_string()
        } else {
            self.conditions.join(" AND ")
        }
    }

    pub fn update_sql(&self, table: &str) -> String {
        format!(
            "UPDATE {} SET {} WHERE {}",
            table,
            self.build_set_clause(),
            self.build_where_clause()
        )
    }

    pub fn delete_sql(&self, table: &str) -> String {
        format!("DELETE FROM {} WHERE {}", table, self.build_where_clause())
    }

    pub fn select_sql(&self, base_query: &str, order_by: &str) -> String {
        format!("{} WHERE {} {}", base_query, self.build_where_clause(), order_by)
            .trim_end()
            .to_string()
    }

    /// Bound values in placeholder order: SET values first, then WHERE values
    pub fn bindings(&self) -> impl Iterator<Item = &BindValue> {
        self.assignment_bindings
            .iter()
            .chain(self.condition_bindings.iter())
    }

    /// Execute an UPDATE and return the number of affected rows
    pub async fn execute_update(&self, pool: &SqlitePool, table: &str) -> Result<u64> {
        let sql = self.update_sql(table);
        let query = bind_all!(sqlx::query(&sql), self.bindings());
        Ok(query.execute(pool).await?.rows_affected())
    }

    /// Execute a DELETE and return the number of affected rows
    pub async fn execute_delete(&self, pool: &SqlitePool, table: &str) -> Result<u64> {
        let sql = self.delete_sql(table);
        let query = bind_all!(sqlx::query(&sql), self.bindings());
        Ok(query.execute(pool).await?.rows_affected())
    }

    /// Execute a SELECT query and return all rows
    pub async fn fetch_all<T>(
        &self,
        pool: &SqlitePool,
        base_query: &str,
        order_by: &str,
    ) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = self.select_sql(base_query, order_by);
        let query = bind_all!(sqlx::query_as::<_, T>(&sql), self.bindings());
        Ok(query.fetch_all(pool).await?)
    }

    /// Execute a SELECT query and return at most one row
    pub async fn fetch_optional<T>(&self, pool: &SqlitePool, base_query: &str) -> Result<Option<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = self.select_sql(base_query, "");
        let query = bind_all!(sqlx::query_as::<_, T>(&sql), self.bindings());
        Ok(query.fetch_optional(pool).await?)
    }
}

impl Default for SafeQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

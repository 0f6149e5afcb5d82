//! Ownership scopes
//!
//! Every statement that reads or writes lists or items is restricted by one of
//! these predicates. A row outside the caller's scope behaves exactly like a
//! row that does not exist.

use super::query_builder::{BindValue, SafeQueryBuilder};
use crate::models::UserId;

/// Lists reachable from a user through `users_lists`
const OWNED_LISTS: &str = "SELECT ul.list_id FROM users_lists ul WHERE ul.user_id = ?";

/// Items reachable from a user through `users_lists` and `lists_items`
const OWNED_ITEMS: &str = "SELECT li.item_id FROM lists_items li \
     INNER JOIN users_lists ul ON ul.list_id = li.list_id \
     WHERE ul.user_id = ?";

/// Restricts a statement on `todo_lists` to the lists a user owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListScope {
    user_id: UserId,
}

impl ListScope {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Constrain `id_column` to owned list ids
    pub fn apply(&self, builder: &mut SafeQueryBuilder, id_column: &str) {
        builder.add_raw_condition(
            &format!("{} IN ({})", id_column, OWNED_LISTS),
            vec![BindValue::Int(self.user_id)],
        );
    }
}

/// Restricts a statement on `todo_items` to the items a user owns,
/// optionally narrowed to a single list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemScope {
    user_id: UserId,
    list_id: Option<i64>,
}

impl ItemScope {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            list_id: None,
        }
    }

    pub fn in_list(user_id: UserId, list_id: i64) -> Self {
        Self {
            user_id,
            list_id: Some(list_id),
        }
    }

    /// Constrain `id_column` to owned item ids
    pub fn apply(&self, builder: &mut SafeQueryBuilder, id_column: &str) {
        match self.list_id {
            None => builder.add_raw_condition(
                &format!("{} IN ({})", id_column, OWNED_ITEMS),
                vec![BindValue::Int(self.user_id)],
            ),
            Some(list_id) => builder.add_raw_condition(
                &format!("{} IN ({} AND li.list_id = ?)", id_column, OWNED_ITEMS),
                vec![BindValue::Int(self.user_id), BindValue::Int(list_id)],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_scope_joins_membership() {
        let mut builder = SafeQueryBuilder::new();
        ListScope::new(3).apply(&mut builder, "tl.id");

        assert_eq!(
            builder.build_where_clause(),
            "tl.id IN (SELECT ul.list_id FROM users_lists ul WHERE ul.user_id = ?)"
        );
        assert_eq!(builder.bindings().cloned().collect::<Vec<_>>(), vec![BindValue::Int(3)]);
    }

    #[test]
    fn test_item_scope_joins_both_links() {
        let mut builder = SafeQueryBuilder::new();
        ItemScope::new(3).apply(&mut builder, "id");

        let clause = builder.build_where_clause();
        assert!(clause.starts_with("id IN (SELECT li.item_id FROM lists_items li"));
        assert!(clause.contains("INNER JOIN users_lists ul ON ul.list_id = li.list_id"));
        assert!(clause.ends_with("WHERE ul.user_id = ?)"));
    }

    #[test]
    fn test_item_scope_in_list_binds_user_then_list() {
        let mut builder = SafeQueryBuilder::new();
        ItemScope::in_list(3, 8).apply(&mut builder, "ti.id");

        assert!(builder
            .build_where_clause()
            .ends_with("WHERE ul.user_id = ? AND li.list_id = ?)"));
        assert_eq!(
            builder.bindings().cloned().collect::<Vec<_>>(),
            vec![BindValue::Int(3), BindValue::Int(8)]
        );
    }
}

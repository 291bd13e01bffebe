//! Statement builder for every gallery operation.
//!
//! # Responsibility
//! - Produce SQL text plus its bound parameter list for one logical operation.
//! - Name every selected column with an explicit alias from [`alias`], so row
//!   decoding never depends on join order.
//!
//! # Invariants
//! - SQL text is always a static string; caller values travel only as bound
//!   parameters.
//! - Builders never touch a connection.
//! - Operations that address an album by name alone only match when exactly
//!   one album carries that name; a shared name resolves to nothing.

use rusqlite::types::Value;

pub mod album;
pub mod picture;
pub mod stats;
pub mod user;

/// Column aliases shared by the statement builder and the row decoder.
pub mod alias {
    pub const ALBUM_ID: &str = "album_id";
    pub const ALBUM_NAME: &str = "album_name";
    pub const ALBUM_CREATION_DATE: &str = "album_creation_date";
    pub const ALBUM_USER_ID: &str = "album_user_id";

    pub const PICTURE_ID: &str = "picture_id";
    pub const PICTURE_NAME: &str = "picture_name";
    pub const PICTURE_LOCATION: &str = "picture_location";
    pub const PICTURE_CREATION_DATE: &str = "picture_creation_date";
    pub const PICTURE_ALBUM_ID: &str = "picture_album_id";

    pub const TAG_USER_ID: &str = "tag_user_id";

    pub const USER_ID: &str = "user_id";
    pub const USER_NAME: &str = "user_name";

    pub const TAG_COUNT: &str = "tag_count";
    pub const COUNT: &str = "count";
    pub const AVERAGE: &str = "average";
}

/// Album columns, aliased as in [`alias`]. Expects the `Albums` table as `a`.
macro_rules! album_columns {
    () => {
        "a.ID AS album_id,
         a.NAME AS album_name,
         a.CREATION_DATE AS album_creation_date,
         a.USER_ID AS album_user_id"
    };
}

/// Picture columns, aliased as in [`alias`]. Expects the `Pictures` table as `p`.
macro_rules! picture_columns {
    () => {
        "p.ID AS picture_id,
         p.NAME AS picture_name,
         p.LOCATION AS picture_location,
         p.CREATION_DATE AS picture_creation_date,
         p.ALBUM_ID AS picture_album_id"
    };
}

/// Resolves the album named by `?1` to its id, or NULL unless the name is
/// carried by exactly one album.
macro_rules! album_by_name {
    () => {
        "(SELECT MIN(ID) FROM Albums WHERE NAME = ?1 GROUP BY NAME HAVING COUNT(*) = 1)"
    };
}

/// Default creation timestamp when the caller supplies none.
macro_rules! now_text {
    () => {
        "strftime('%Y-%m-%d %H:%M:%S', 'now')"
    };
}

pub(crate) use {album_by_name, album_columns, now_text, picture_columns};

/// One ready-to-execute statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: &'static str,
    params: Vec<Value>,
}

impl Statement {
    pub(crate) fn new(sql: &'static str, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    pub fn sql(&self) -> &'static str {
        self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

pub(crate) fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub(crate) fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text)
}

pub(crate) fn integer(value: i64) -> Value {
    Value::Integer(value)
}

/// Statements that empty every gallery table, children first.
pub fn clear() -> Vec<Statement> {
    [
        "DELETE FROM Tags;",
        "DELETE FROM Pictures;",
        "DELETE FROM Albums;",
        "DELETE FROM Users;",
    ]
    .into_iter()
    .map(|sql| Statement::new(sql, Vec::new()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{album, clear, picture, user};
    use rusqlite::types::Value;

    #[test]
    fn user_values_are_bound_never_spliced() {
        let hostile = "x'); DROP TABLE Users;--";
        let statements = [
            user::create_user(hostile),
            album::delete_album(hostile, 1),
            picture::remove_picture_from_album_by_name(hostile, hostile),
        ];

        for statement in statements {
            assert!(!statement.sql().contains(hostile));
            assert!(statement
                .params()
                .contains(&Value::Text(hostile.to_string())));
        }
    }

    #[test]
    fn parameter_count_matches_highest_placeholder() {
        let statement = picture::untag_user_in_picture("trip", "beach", 4);
        assert!(statement.sql().contains("?3"));
        assert!(!statement.sql().contains("?4"));
        assert_eq!(statement.params().len(), 3);
    }

    #[test]
    fn clear_deletes_children_before_parents() {
        let order: Vec<&str> = clear().iter().map(|statement| statement.sql()).collect();
        assert_eq!(
            order,
            vec![
                "DELETE FROM Tags;",
                "DELETE FROM Pictures;",
                "DELETE FROM Albums;",
                "DELETE FROM Users;"
            ]
        );
    }
}

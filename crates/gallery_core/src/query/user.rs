//! User statements.

use super::{integer, text, Statement};
use crate::model::UserId;

pub fn create_user(name: &str) -> Statement {
    Statement::new("INSERT INTO Users (NAME) VALUES (?1);", vec![text(name)])
}

/// Albums, pictures and tags of the user go with it through cascades.
pub fn delete_user(user_id: UserId) -> Statement {
    Statement::new("DELETE FROM Users WHERE ID = ?1;", vec![integer(user_id)])
}

pub fn rename_user(user_id: UserId, new_name: &str) -> Statement {
    Statement::new(
        "UPDATE Users SET NAME = ?2 WHERE ID = ?1;",
        vec![integer(user_id), text(new_name)],
    )
}

pub fn does_user_exist(user_id: UserId) -> Statement {
    Statement::new(
        "SELECT COUNT(*) AS count FROM Users WHERE ID = ?1;",
        vec![integer(user_id)],
    )
}

pub fn get_user(user_id: UserId) -> Statement {
    Statement::new(
        "SELECT ID AS user_id, NAME AS user_name FROM Users WHERE ID = ?1;",
        vec![integer(user_id)],
    )
}

pub fn list_users() -> Statement {
    Statement::new(
        "SELECT ID AS user_id, NAME AS user_name FROM Users ORDER BY ID ASC;",
        Vec::new(),
    )
}

/// Most-tagged user; ties go to the lowest user id.
pub fn get_top_tagged_user() -> Statement {
    Statement::new(
        "SELECT u.ID AS user_id, u.NAME AS user_name, COUNT(t.ID) AS tag_count
         FROM Users u
         INNER JOIN Tags t ON t.USER_ID = u.ID
         GROUP BY u.ID, u.NAME
         ORDER BY tag_count DESC, u.ID ASC
         LIMIT 1;",
        Vec::new(),
    )
}

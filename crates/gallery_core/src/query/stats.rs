//! Per-user aggregate statements. Each yields one row with one column.

use super::{integer, Statement};
use crate::model::UserId;

pub fn count_albums_owned_of_user(user_id: UserId) -> Statement {
    Statement::new(
        "SELECT COUNT(*) AS count FROM Albums WHERE USER_ID = ?1;",
        vec![integer(user_id)],
    )
}

/// Distinct albums holding at least one picture the user is tagged in.
pub fn count_albums_tagged_of_user(user_id: UserId) -> Statement {
    Statement::new(
        "SELECT COUNT(DISTINCT p.ALBUM_ID) AS count
         FROM Tags t
         INNER JOIN Pictures p ON p.ID = t.PICTURE_ID
         WHERE t.USER_ID = ?1;",
        vec![integer(user_id)],
    )
}

pub fn count_tags_of_user(user_id: UserId) -> Statement {
    Statement::new(
        "SELECT COUNT(*) AS count FROM Tags WHERE USER_ID = ?1;",
        vec![integer(user_id)],
    )
}

/// `average` is NULL when the user has no tags at all.
pub fn average_tags_per_album_of_user(user_id: UserId) -> Statement {
    Statement::new(
        "SELECT AVG(per_album.tag_count) AS average
         FROM (
            SELECT COUNT(*) AS tag_count
            FROM Tags t
            INNER JOIN Pictures p ON p.ID = t.PICTURE_ID
            WHERE t.USER_ID = ?1
            GROUP BY p.ALBUM_ID
         ) per_album;",
        vec![integer(user_id)],
    )
}

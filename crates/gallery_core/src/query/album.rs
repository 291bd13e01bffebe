//! Album statements.

use super::{
    album_by_name, album_columns, integer, now_text, optional_text, picture_columns, text,
    Statement,
};
use crate::model::album::NewAlbum;
use crate::model::{AlbumId, UserId};

/// Album + pictures + tags, one row per (picture, tag) pair.
macro_rules! album_graph_select {
    () => {
        concat!(
            "SELECT ",
            album_columns!(),
            ", ",
            picture_columns!(),
            ", t.USER_ID AS tag_user_id
             FROM Albums a
             LEFT JOIN Pictures p ON p.ALBUM_ID = a.ID
             LEFT JOIN Tags t ON t.PICTURE_ID = p.ID"
        )
    };
}

pub fn create_album(album: &NewAlbum) -> Statement {
    Statement::new(
        concat!(
            "INSERT INTO Albums (NAME, CREATION_DATE, USER_ID)
             VALUES (?1, COALESCE(?2, ",
            now_text!(),
            "), ?3);"
        ),
        vec![
            text(&album.name),
            optional_text(album.creation_date.as_deref()),
            integer(album.user_id),
        ],
    )
}

/// Deletes by (name, owner); the same name under another owner is untouched.
pub fn delete_album(name: &str, user_id: UserId) -> Statement {
    Statement::new(
        "DELETE FROM Albums WHERE NAME = ?1 AND USER_ID = ?2;",
        vec![text(name), integer(user_id)],
    )
}

pub fn rename_album(name: &str, user_id: UserId, new_name: &str) -> Statement {
    Statement::new(
        "UPDATE Albums SET NAME = ?3 WHERE NAME = ?1 AND USER_ID = ?2;",
        vec![text(name), integer(user_id), text(new_name)],
    )
}

pub fn does_album_exist(name: &str, user_id: UserId) -> Statement {
    Statement::new(
        "SELECT COUNT(*) AS count FROM Albums WHERE NAME = ?1 AND USER_ID = ?2;",
        vec![text(name), integer(user_id)],
    )
}

/// Number of albums, across all owners, carrying `name`.
pub fn count_albums_named(name: &str) -> Statement {
    Statement::new(
        "SELECT COUNT(*) AS count FROM Albums WHERE NAME = ?1;",
        vec![text(name)],
    )
}

pub fn open_album(name: &str) -> Statement {
    Statement::new(
        concat!(
            album_graph_select!(),
            " WHERE a.ID = ",
            album_by_name!(),
            " ORDER BY p.ID ASC, t.USER_ID ASC;"
        ),
        vec![text(name)],
    )
}

pub fn get_album(album_id: AlbumId) -> Statement {
    Statement::new(
        concat!(
            album_graph_select!(),
            " WHERE a.ID = ?1 ORDER BY p.ID ASC, t.USER_ID ASC;"
        ),
        vec![integer(album_id)],
    )
}

pub fn get_albums() -> Statement {
    Statement::new(
        concat!(
            album_graph_select!(),
            " ORDER BY a.ID ASC, p.ID ASC, t.USER_ID ASC;"
        ),
        Vec::new(),
    )
}

pub fn get_albums_of_user(user_id: UserId) -> Statement {
    Statement::new(
        concat!(
            album_graph_select!(),
            " WHERE a.USER_ID = ?1 ORDER BY a.ID ASC, p.ID ASC, t.USER_ID ASC;"
        ),
        vec![integer(user_id)],
    )
}

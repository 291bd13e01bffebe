//! Picture and tag statements.

use super::{album_by_name, integer, now_text, optional_text, picture_columns, text, Statement};
use crate::model::picture::NewPicture;
use crate::model::{PictureId, UserId};

/// Picture + tags, one row per tag (or one row with a NULL tag).
macro_rules! picture_graph_select {
    () => {
        concat!(
            "SELECT ",
            picture_columns!(),
            ", t.USER_ID AS tag_user_id
             FROM Pictures p
             LEFT JOIN Tags t ON t.PICTURE_ID = p.ID"
        )
    };
}

/// Resolves picture `?2` inside album `?1`.
macro_rules! picture_in_album {
    () => {
        concat!(
            "(SELECT ID FROM Pictures WHERE NAME = ?2 AND ALBUM_ID = ",
            album_by_name!(),
            ")"
        )
    };
}

/// Inserts into the album named `album_name`; zero changed rows means the
/// album does not exist.
pub fn add_picture_to_album_by_name(album_name: &str, picture: &NewPicture) -> Statement {
    Statement::new(
        concat!(
            "INSERT INTO Pictures (NAME, LOCATION, CREATION_DATE, ALBUM_ID)
             SELECT ?2, ?3, COALESCE(?4, ",
            now_text!(),
            "), ID FROM Albums WHERE ID = ",
            album_by_name!(),
            ";"
        ),
        vec![
            text(album_name),
            text(&picture.name),
            text(&picture.location),
            optional_text(picture.creation_date.as_deref()),
        ],
    )
}

pub fn remove_picture_from_album_by_name(album_name: &str, picture_name: &str) -> Statement {
    Statement::new(
        concat!(
            "DELETE FROM Pictures WHERE NAME = ?2 AND ALBUM_ID = ",
            album_by_name!(),
            ";"
        ),
        vec![text(album_name), text(picture_name)],
    )
}

/// Zero changed rows means the picture does not exist in that album.
pub fn tag_user_in_picture(album_name: &str, picture_name: &str, user_id: UserId) -> Statement {
    Statement::new(
        concat!(
            "INSERT INTO Tags (PICTURE_ID, USER_ID)
             SELECT ID, ?3 FROM Pictures WHERE ID = ",
            picture_in_album!(),
            ";"
        ),
        vec![text(album_name), text(picture_name), integer(user_id)],
    )
}

pub fn untag_user_in_picture(album_name: &str, picture_name: &str, user_id: UserId) -> Statement {
    Statement::new(
        concat!(
            "DELETE FROM Tags WHERE USER_ID = ?3 AND PICTURE_ID = ",
            picture_in_album!(),
            ";"
        ),
        vec![text(album_name), text(picture_name), integer(user_id)],
    )
}

pub fn get_picture(picture_id: PictureId) -> Statement {
    Statement::new(
        concat!(
            picture_graph_select!(),
            " WHERE p.ID = ?1 ORDER BY t.USER_ID ASC;"
        ),
        vec![integer(picture_id)],
    )
}

/// Pictures the user is tagged in, each with its full tag set.
pub fn get_tagged_pictures_of_user(user_id: UserId) -> Statement {
    Statement::new(
        concat!(
            picture_graph_select!(),
            " WHERE p.ID IN (SELECT PICTURE_ID FROM Tags WHERE USER_ID = ?1)
             ORDER BY p.ID ASC, t.USER_ID ASC;"
        ),
        vec![integer(user_id)],
    )
}

/// Most-tagged picture; ties go to the lowest picture id.
pub fn get_top_tagged_picture() -> Statement {
    Statement::new(
        concat!(
            picture_graph_select!(),
            " WHERE p.ID = (
                SELECT PICTURE_ID FROM Tags
                GROUP BY PICTURE_ID
                ORDER BY COUNT(*) DESC, PICTURE_ID ASC
                LIMIT 1
             )
             ORDER BY t.USER_ID ASC;"
        ),
        Vec::new(),
    )
}

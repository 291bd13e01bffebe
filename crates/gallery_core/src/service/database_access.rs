//! Connection-owning gallery facade.
//!
//! # Invariants
//! - A `DatabaseAccess` only exists for a connection whose schema applied.
//! - Names are validated here; the repository never sees blank names.
//! - Each call logs one metadata-only `event=gallery_op` line; names and
//!   other user-supplied values are never logged.

use crate::db::{open_db, open_db_in_memory};
use crate::model::album::{Album, NewAlbum};
use crate::model::picture::{NewPicture, Picture};
use crate::model::require_name;
use crate::model::user::User;
use crate::model::UserId;
use crate::repo::{GalleryRepository, RepoError, SqliteGalleryRepository};
use crate::service::{DataAccess, GalleryError, GalleryResult};
use log::{debug, error, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Gallery facade over one SQLite connection.
pub struct DatabaseAccess {
    conn: Connection,
}

impl DatabaseAccess {
    /// Opens (creating when absent) the gallery database at `path`.
    ///
    /// Fails with `Store` when the file cannot be opened or the schema cannot
    /// be applied; no partially initialized handle is returned.
    pub fn open(path: impl AsRef<Path>) -> GalleryResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a private in-memory gallery.
    pub fn open_in_memory() -> GalleryResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Adopts a connection returned by `db::open_db*`.
    pub fn from_connection(conn: Connection) -> GalleryResult<Self> {
        SqliteGalleryRepository::try_new(&conn)?;
        Ok(Self { conn })
    }

    /// Closes the connection, surfacing any close failure.
    ///
    /// Dropping a `DatabaseAccess` closes it too, ignoring errors.
    pub fn close(self) -> GalleryResult<()> {
        self.conn
            .close()
            .map_err(|(_, err)| GalleryError::from(RepoError::from(err)))
    }

    fn run<T>(
        &self,
        op: &'static str,
        action: impl FnOnce(&SqliteGalleryRepository<'_>) -> GalleryResult<T>,
    ) -> GalleryResult<T> {
        let started_at = Instant::now();
        let repo = SqliteGalleryRepository::new(&self.conn);
        let result = action(&repo);
        let duration_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(_) => debug!(
                "event=gallery_op module=service op={op} status=ok duration_ms={duration_ms}"
            ),
            Err(err @ (GalleryError::Validation(_) | GalleryError::NotFound(_))) => warn!(
                "event=gallery_op module=service op={op} status=error duration_ms={duration_ms} error_code={}",
                err.code()
            ),
            Err(err) => error!(
                "event=gallery_op module=service op={op} status=error duration_ms={duration_ms} error_code={}",
                err.code()
            ),
        }
        result
    }
}

impl DataAccess for DatabaseAccess {
    fn get_albums(&self) -> GalleryResult<Vec<Album>> {
        self.run("get_albums", |repo| Ok(repo.list_albums()?))
    }

    fn get_albums_of_user(&self, user_id: UserId) -> GalleryResult<Vec<Album>> {
        self.run("get_albums_of_user", |repo| {
            Ok(repo.list_albums_of_user(user_id)?)
        })
    }

    fn create_album(&self, album: &NewAlbum) -> GalleryResult<Album> {
        self.run("create_album", |repo| {
            album.validate()?;
            Ok(repo.create_album(album)?)
        })
    }

    fn delete_album(&self, album_name: &str, user_id: UserId) -> GalleryResult<()> {
        self.run("delete_album", |repo| {
            require_name("album", album_name)?;
            Ok(repo.delete_album(album_name, user_id)?)
        })
    }

    fn does_album_exist(&self, album_name: &str, user_id: UserId) -> GalleryResult<bool> {
        self.run("does_album_exist", |repo| {
            require_name("album", album_name)?;
            Ok(repo.album_exists(album_name, user_id)?)
        })
    }

    fn open_album(&self, album_name: &str) -> GalleryResult<Album> {
        self.run("open_album", |repo| {
            require_name("album", album_name)?;
            repo.open_album(album_name)?
                .ok_or_else(|| GalleryError::NotFound(format!("album `{album_name}`")))
        })
    }

    fn rename_album(
        &self,
        album_name: &str,
        user_id: UserId,
        new_name: &str,
    ) -> GalleryResult<()> {
        self.run("rename_album", |repo| {
            require_name("album", album_name)?;
            require_name("album", new_name)?;
            Ok(repo.rename_album(album_name, user_id, new_name)?)
        })
    }

    fn add_picture_to_album_by_name(
        &self,
        album_name: &str,
        picture: &NewPicture,
    ) -> GalleryResult<Picture> {
        self.run("add_picture_to_album_by_name", |repo| {
            require_name("album", album_name)?;
            picture.validate()?;
            Ok(repo.add_picture(album_name, picture)?)
        })
    }

    fn remove_picture_from_album_by_name(
        &self,
        album_name: &str,
        picture_name: &str,
    ) -> GalleryResult<()> {
        self.run("remove_picture_from_album_by_name", |repo| {
            require_name("album", album_name)?;
            require_name("picture", picture_name)?;
            Ok(repo.remove_picture(album_name, picture_name)?)
        })
    }

    fn tag_user_in_picture(
        &self,
        album_name: &str,
        picture_name: &str,
        user_id: UserId,
    ) -> GalleryResult<()> {
        self.run("tag_user_in_picture", |repo| {
            require_name("album", album_name)?;
            require_name("picture", picture_name)?;
            Ok(repo.tag_user(album_name, picture_name, user_id)?)
        })
    }

    fn untag_user_in_picture(
        &self,
        album_name: &str,
        picture_name: &str,
        user_id: UserId,
    ) -> GalleryResult<()> {
        self.run("untag_user_in_picture", |repo| {
            require_name("album", album_name)?;
            require_name("picture", picture_name)?;
            Ok(repo.untag_user(album_name, picture_name, user_id)?)
        })
    }

    fn list_users(&self) -> GalleryResult<Vec<User>> {
        self.run("list_users", |repo| Ok(repo.list_users()?))
    }

    fn create_user(&self, name: &str) -> GalleryResult<User> {
        self.run("create_user", |repo| {
            require_name("user", name)?;
            Ok(repo.create_user(name)?)
        })
    }

    fn delete_user(&self, user_id: UserId) -> GalleryResult<()> {
        self.run("delete_user", |repo| Ok(repo.delete_user(user_id)?))
    }

    fn does_user_exist(&self, user_id: UserId) -> GalleryResult<bool> {
        self.run("does_user_exist", |repo| Ok(repo.user_exists(user_id)?))
    }

    fn get_user(&self, user_id: UserId) -> GalleryResult<User> {
        self.run("get_user", |repo| match repo.get_user(user_id)? {
            // An empty name after the query means no row matched.
            Some(user) if !user.name.is_empty() => Ok(user),
            _ => Err(GalleryError::NotFound(format!("user {user_id}"))),
        })
    }

    fn rename_user(&self, user_id: UserId, new_name: &str) -> GalleryResult<()> {
        self.run("rename_user", |repo| {
            require_name("user", new_name)?;
            Ok(repo.rename_user(user_id, new_name)?)
        })
    }

    fn count_albums_owned_of_user(&self, user_id: UserId) -> GalleryResult<i64> {
        self.run("count_albums_owned_of_user", |repo| {
            Ok(repo.count_albums_owned(user_id)?)
        })
    }

    fn count_albums_tagged_of_user(&self, user_id: UserId) -> GalleryResult<i64> {
        self.run("count_albums_tagged_of_user", |repo| {
            Ok(repo.count_albums_tagged(user_id)?)
        })
    }

    fn count_tags_of_user(&self, user_id: UserId) -> GalleryResult<i64> {
        self.run("count_tags_of_user", |repo| Ok(repo.count_tags(user_id)?))
    }

    fn average_tags_per_album_of_user(&self, user_id: UserId) -> GalleryResult<f64> {
        self.run("average_tags_per_album_of_user", |repo| {
            repo.average_tags_per_album(user_id)?.ok_or_else(|| {
                GalleryError::NotFound(format!("tagged albums of user {user_id}"))
            })
        })
    }

    fn get_top_tagged_user(&self) -> GalleryResult<User> {
        self.run("get_top_tagged_user", |repo| {
            repo.top_tagged_user()?
                .ok_or_else(|| GalleryError::NotFound("tagged user".to_string()))
        })
    }

    fn get_top_tagged_picture(&self) -> GalleryResult<Picture> {
        self.run("get_top_tagged_picture", |repo| {
            repo.top_tagged_picture()?
                .ok_or_else(|| GalleryError::NotFound("tagged picture".to_string()))
        })
    }

    fn get_tagged_pictures_of_user(&self, user_id: UserId) -> GalleryResult<Vec<Picture>> {
        self.run("get_tagged_pictures_of_user", |repo| {
            Ok(repo.tagged_pictures_of_user(user_id)?)
        })
    }

    fn clear(&self) -> GalleryResult<()> {
        self.run("clear", |repo| Ok(repo.clear()?))
    }
}

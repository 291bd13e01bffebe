//! Mutex-guarded facade for callers on several threads.

use crate::model::album::{Album, NewAlbum};
use crate::model::picture::{NewPicture, Picture};
use crate::model::user::User;
use crate::model::UserId;
use crate::service::{DataAccess, DatabaseAccess, GalleryResult};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serializes every call on one [`DatabaseAccess`].
///
/// Each call holds the lock for its full duration, so statements of two
/// callers never interleave on the connection.
pub struct SharedDatabaseAccess {
    inner: Mutex<DatabaseAccess>,
}

impl SharedDatabaseAccess {
    pub fn new(access: DatabaseAccess) -> Self {
        Self {
            inner: Mutex::new(access),
        }
    }

    /// Returns the wrapped facade, e.g. to `close` it explicitly.
    pub fn into_inner(self) -> DatabaseAccess {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // A panic in another caller does not invalidate the connection.
    fn lock(&self) -> MutexGuard<'_, DatabaseAccess> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DataAccess for SharedDatabaseAccess {
    fn get_albums(&self) -> GalleryResult<Vec<Album>> {
        self.lock().get_albums()
    }

    fn get_albums_of_user(&self, user_id: UserId) -> GalleryResult<Vec<Album>> {
        self.lock().get_albums_of_user(user_id)
    }

    fn create_album(&self, album: &NewAlbum) -> GalleryResult<Album> {
        self.lock().create_album(album)
    }

    fn delete_album(&self, album_name: &str, user_id: UserId) -> GalleryResult<()> {
        self.lock().delete_album(album_name, user_id)
    }

    fn does_album_exist(&self, album_name: &str, user_id: UserId) -> GalleryResult<bool> {
        self.lock().does_album_exist(album_name, user_id)
    }

    fn open_album(&self, album_name: &str) -> GalleryResult<Album> {
        self.lock().open_album(album_name)
    }

    fn rename_album(
        &self,
        album_name: &str,
        user_id: UserId,
        new_name: &str,
    ) -> GalleryResult<()> {
        self.lock().rename_album(album_name, user_id, new_name)
    }

    fn add_picture_to_album_by_name(
        &self,
        album_name: &str,
        picture: &NewPicture,
    ) -> GalleryResult<Picture> {
        self.lock().add_picture_to_album_by_name(album_name, picture)
    }

    fn remove_picture_from_album_by_name(
        &self,
        album_name: &str,
        picture_name: &str,
    ) -> GalleryResult<()> {
        self.lock()
            .remove_picture_from_album_by_name(album_name, picture_name)
    }

    fn tag_user_in_picture(
        &self,
        album_name: &str,
        picture_name: &str,
        user_id: UserId,
    ) -> GalleryResult<()> {
        self.lock()
            .tag_user_in_picture(album_name, picture_name, user_id)
    }

    fn untag_user_in_picture(
        &self,
        album_name: &str,
        picture_name: &str,
        user_id: UserId,
    ) -> GalleryResult<()> {
        self.lock()
            .untag_user_in_picture(album_name, picture_name, user_id)
    }

    fn list_users(&self) -> GalleryResult<Vec<User>> {
        self.lock().list_users()
    }

    fn create_user(&self, name: &str) -> GalleryResult<User> {
        self.lock().create_user(name)
    }

    fn delete_user(&self, user_id: UserId) -> GalleryResult<()> {
        self.lock().delete_user(user_id)
    }

    fn does_user_exist(&self, user_id: UserId) -> GalleryResult<bool> {
        self.lock().does_user_exist(user_id)
    }

    fn get_user(&self, user_id: UserId) -> GalleryResult<User> {
        self.lock().get_user(user_id)
    }

    fn rename_user(&self, user_id: UserId, new_name: &str) -> GalleryResult<()> {
        self.lock().rename_user(user_id, new_name)
    }

    fn count_albums_owned_of_user(&self, user_id: UserId) -> GalleryResult<i64> {
        self.lock().count_albums_owned_of_user(user_id)
    }

    fn count_albums_tagged_of_user(&self, user_id: UserId) -> GalleryResult<i64> {
        self.lock().count_albums_tagged_of_user(user_id)
    }

    fn count_tags_of_user(&self, user_id: UserId) -> GalleryResult<i64> {
        self.lock().count_tags_of_user(user_id)
    }

    fn average_tags_per_album_of_user(&self, user_id: UserId) -> GalleryResult<f64> {
        self.lock().average_tags_per_album_of_user(user_id)
    }

    fn get_top_tagged_user(&self) -> GalleryResult<User> {
        self.lock().get_top_tagged_user()
    }

    fn get_top_tagged_picture(&self) -> GalleryResult<Picture> {
        self.lock().get_top_tagged_picture()
    }

    fn get_tagged_pictures_of_user(&self, user_id: UserId) -> GalleryResult<Vec<Picture>> {
        self.lock().get_tagged_pictures_of_user(user_id)
    }

    fn clear(&self) -> GalleryResult<()> {
        self.lock().clear()
    }
}

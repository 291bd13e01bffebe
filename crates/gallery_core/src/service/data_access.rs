use crate::model::album::{Album, NewAlbum};
use crate::model::picture::{NewPicture, Picture};
use crate::model::user::User;
use crate::model::UserId;
use crate::service::GalleryResult;

/// Gallery operations consumed by a command layer.
///
/// Album names are unique per owner only. Methods taking an album name
/// without an owner fail with `Integrity` when several owners share it.
pub trait DataAccess {
    // album related
    fn get_albums(&self) -> GalleryResult<Vec<Album>>;
    fn get_albums_of_user(&self, user_id: UserId) -> GalleryResult<Vec<Album>>;
    fn create_album(&self, album: &NewAlbum) -> GalleryResult<Album>;
    fn delete_album(&self, album_name: &str, user_id: UserId) -> GalleryResult<()>;
    fn does_album_exist(&self, album_name: &str, user_id: UserId) -> GalleryResult<bool>;
    fn open_album(&self, album_name: &str) -> GalleryResult<Album>;
    fn rename_album(&self, album_name: &str, user_id: UserId, new_name: &str)
        -> GalleryResult<()>;

    /// Releases an album returned by `open_album`. Nothing is written back.
    fn close_album(&self, album: Album) {
        log::debug!(
            "event=album_close module=service status=ok pictures={}",
            album.pictures.len()
        );
    }

    // picture related
    fn add_picture_to_album_by_name(
        &self,
        album_name: &str,
        picture: &NewPicture,
    ) -> GalleryResult<Picture>;
    fn remove_picture_from_album_by_name(
        &self,
        album_name: &str,
        picture_name: &str,
    ) -> GalleryResult<()>;
    fn tag_user_in_picture(
        &self,
        album_name: &str,
        picture_name: &str,
        user_id: UserId,
    ) -> GalleryResult<()>;
    fn untag_user_in_picture(
        &self,
        album_name: &str,
        picture_name: &str,
        user_id: UserId,
    ) -> GalleryResult<()>;

    // user related
    fn list_users(&self) -> GalleryResult<Vec<User>>;
    fn create_user(&self, name: &str) -> GalleryResult<User>;
    /// Cascades to the user's albums, their pictures, and every tag of
    /// or on them.
    fn delete_user(&self, user_id: UserId) -> GalleryResult<()>;
    fn does_user_exist(&self, user_id: UserId) -> GalleryResult<bool>;
    fn get_user(&self, user_id: UserId) -> GalleryResult<User>;
    fn rename_user(&self, user_id: UserId, new_name: &str) -> GalleryResult<()>;

    // user statistics
    fn count_albums_owned_of_user(&self, user_id: UserId) -> GalleryResult<i64>;
    fn count_albums_tagged_of_user(&self, user_id: UserId) -> GalleryResult<i64>;
    fn count_tags_of_user(&self, user_id: UserId) -> GalleryResult<i64>;
    /// Mean of the user's per-album tag counts, over albums where the user
    /// is tagged. `NotFound` when there is nothing to average.
    fn average_tags_per_album_of_user(&self, user_id: UserId) -> GalleryResult<f64>;

    // queries; ties on tag count go to the lowest id
    fn get_top_tagged_user(&self) -> GalleryResult<User>;
    fn get_top_tagged_picture(&self) -> GalleryResult<Picture>;
    fn get_tagged_pictures_of_user(&self, user_id: UserId) -> GalleryResult<Vec<Picture>>;

    /// Deletes every user, album, picture and tag.
    fn clear(&self) -> GalleryResult<()>;
}

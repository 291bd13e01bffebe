//! Gallery repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide one use-case method per gallery operation.
//! - Compose statement builders, execution and materializers; keep SQL
//!   details inside the persistence boundary.
//!
//! # Invariants
//! - Every statement is executed with bound parameters from `query`.
//! - Cascading deletes are left to the store; nothing is recomputed in memory.
//! - Store-generated ids are read back after insert, never predicted.

use crate::db::DbError;
use crate::model::album::{Album, NewAlbum};
use crate::model::picture::{NewPicture, Picture};
use crate::model::user::User;
use crate::model::UserId;
use crate::query::{self, album, picture, stats, user, Statement};
use crate::repo::materialize::{
    AlbumListMaterializer, AlbumMaterializer, AllRows, FirstRow, MaterializeError,
    PictureListMaterializer, RowVisitor,
};
use crate::repo::row::{AverageCell, CountCell, DecodeError, RawRow};
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REQUIRED_TABLES: [&str; 4] = ["Users", "Albums", "Pictures", "Tags"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for gallery persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Decode(DecodeError),
    /// A mutation addressed a row that does not exist.
    NotFound(String),
    /// Result rows contradict each other or an aggregate returned no row.
    InvalidData(String),
    /// Connection schema lacks a gallery table.
    MissingRequiredTable(&'static str),
    /// An album addressed by name alone is carried by several owners.
    AmbiguousAlbumName(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::NotFound(what) => write!(f, "{what} not found"),
            Self::InvalidData(message) => write!(f, "invalid gallery data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "gallery repository requires table `{table}`")
            }
            Self::AmbiguousAlbumName(name) => {
                write!(f, "ambiguous album name `{name}`: several owners use it")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
            Self::MissingRequiredTable(_) => None,
            Self::AmbiguousAlbumName(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<DecodeError> for RepoError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<MaterializeError> for RepoError {
    fn from(value: MaterializeError) -> Self {
        match value {
            MaterializeError::Decode(err) => Self::Decode(err),
            MaterializeError::Conflict(message) => Self::InvalidData(message),
        }
    }
}

/// Repository interface for gallery operations.
///
/// Inputs are assumed validated; see `service` for the checked surface.
pub trait GalleryRepository {
    fn create_user(&self, name: &str) -> RepoResult<User>;
    fn delete_user(&self, user_id: UserId) -> RepoResult<()>;
    fn rename_user(&self, user_id: UserId, new_name: &str) -> RepoResult<()>;
    fn user_exists(&self, user_id: UserId) -> RepoResult<bool>;
    fn get_user(&self, user_id: UserId) -> RepoResult<Option<User>>;
    fn list_users(&self) -> RepoResult<Vec<User>>;

    fn create_album(&self, album: &NewAlbum) -> RepoResult<Album>;
    fn delete_album(&self, name: &str, user_id: UserId) -> RepoResult<()>;
    fn rename_album(&self, name: &str, user_id: UserId, new_name: &str) -> RepoResult<()>;
    fn album_exists(&self, name: &str, user_id: UserId) -> RepoResult<bool>;
    /// Loads the album named `name` with pictures and tags.
    fn open_album(&self, name: &str) -> RepoResult<Option<Album>>;
    fn list_albums(&self) -> RepoResult<Vec<Album>>;
    fn list_albums_of_user(&self, user_id: UserId) -> RepoResult<Vec<Album>>;

    fn add_picture(&self, album_name: &str, picture: &NewPicture) -> RepoResult<Picture>;
    fn remove_picture(&self, album_name: &str, picture_name: &str) -> RepoResult<()>;
    fn tag_user(&self, album_name: &str, picture_name: &str, user_id: UserId) -> RepoResult<()>;
    fn untag_user(&self, album_name: &str, picture_name: &str, user_id: UserId)
        -> RepoResult<()>;

    fn count_albums_owned(&self, user_id: UserId) -> RepoResult<i64>;
    fn count_albums_tagged(&self, user_id: UserId) -> RepoResult<i64>;
    fn count_tags(&self, user_id: UserId) -> RepoResult<i64>;
    /// `None` when the user has no tags to average over.
    fn average_tags_per_album(&self, user_id: UserId) -> RepoResult<Option<f64>>;

    fn top_tagged_user(&self) -> RepoResult<Option<User>>;
    fn top_tagged_picture(&self) -> RepoResult<Option<Picture>>;
    fn tagged_pictures_of_user(&self, user_id: UserId) -> RepoResult<Vec<Picture>>;

    /// Removes every row from every gallery table in one transaction.
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed gallery repository.
pub struct SqliteGalleryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGalleryRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking that every gallery table exists.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }

    fn execute(&self, statement: &Statement) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute(statement.sql(), params_from_iter(statement.params()))?;
        Ok(changed)
    }

    /// Executes a mutation that must touch at least one row.
    fn execute_expecting_rows(&self, statement: &Statement, what: String) -> RepoResult<()> {
        if self.execute(statement)? == 0 {
            return Err(RepoError::NotFound(what));
        }
        Ok(())
    }

    fn query(&self, statement: &Statement, visitor: &mut dyn RowVisitor) -> RepoResult<()> {
        let mut stmt = self.conn.prepare(statement.sql())?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut rows = stmt.query(params_from_iter(statement.params()))?;
        while let Some(row) = rows.next()? {
            let raw = RawRow::from_sqlite(row, &column_names)?;
            visitor.visit_row(&raw)?;
        }
        Ok(())
    }

    /// Rejects a name-only album address that more than one album matches.
    fn ensure_unambiguous_album(&self, name: &str) -> RepoResult<()> {
        if self.query_count(&album::count_albums_named(name))? > 1 {
            return Err(RepoError::AmbiguousAlbumName(name.to_string()));
        }
        Ok(())
    }

    fn query_count(&self, statement: &Statement) -> RepoResult<i64> {
        let mut first = FirstRow::<CountCell>::new();
        self.query(statement, &mut first)?;
        first
            .finish()
            .and_then(|cell| cell.0)
            .ok_or_else(|| RepoError::InvalidData("count query returned no value".to_string()))
    }

    fn query_album(&self, statement: &Statement) -> RepoResult<Option<Album>> {
        let mut materializer = AlbumMaterializer::new();
        self.query(statement, &mut materializer)?;
        Ok(materializer.finish())
    }

    fn query_albums(&self, statement: &Statement) -> RepoResult<Vec<Album>> {
        let mut materializer = AlbumListMaterializer::new();
        self.query(statement, &mut materializer)?;
        Ok(materializer.finish())
    }

    fn query_pictures(&self, statement: &Statement) -> RepoResult<Vec<Picture>> {
        let mut materializer = PictureListMaterializer::new();
        self.query(statement, &mut materializer)?;
        Ok(materializer.finish())
    }
}

impl GalleryRepository for SqliteGalleryRepository<'_> {
    fn create_user(&self, name: &str) -> RepoResult<User> {
        self.execute(&user::create_user(name))?;
        Ok(User::new(self.conn.last_insert_rowid(), name))
    }

    fn delete_user(&self, user_id: UserId) -> RepoResult<()> {
        self.execute_expecting_rows(&user::delete_user(user_id), format!("user {user_id}"))
    }

    fn rename_user(&self, user_id: UserId, new_name: &str) -> RepoResult<()> {
        self.execute_expecting_rows(
            &user::rename_user(user_id, new_name),
            format!("user {user_id}"),
        )
    }

    fn user_exists(&self, user_id: UserId) -> RepoResult<bool> {
        Ok(self.query_count(&user::does_user_exist(user_id))? > 0)
    }

    fn get_user(&self, user_id: UserId) -> RepoResult<Option<User>> {
        let mut first = FirstRow::<User>::new();
        self.query(&user::get_user(user_id), &mut first)?;
        Ok(first.finish())
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut all = AllRows::<User>::new();
        self.query(&user::list_users(), &mut all)?;
        Ok(all.finish())
    }

    fn create_album(&self, new_album: &NewAlbum) -> RepoResult<Album> {
        self.execute(&album::create_album(new_album))?;
        let album_id = self.conn.last_insert_rowid();
        self.query_album(&album::get_album(album_id))?
            .ok_or_else(|| RepoError::InvalidData(format!("album {album_id} missing after insert")))
    }

    fn delete_album(&self, name: &str, user_id: UserId) -> RepoResult<()> {
        self.execute_expecting_rows(
            &album::delete_album(name, user_id),
            format!("album `{name}` of user {user_id}"),
        )
    }

    fn rename_album(&self, name: &str, user_id: UserId, new_name: &str) -> RepoResult<()> {
        self.execute_expecting_rows(
            &album::rename_album(name, user_id, new_name),
            format!("album `{name}` of user {user_id}"),
        )
    }

    fn album_exists(&self, name: &str, user_id: UserId) -> RepoResult<bool> {
        Ok(self.query_count(&album::does_album_exist(name, user_id))? > 0)
    }

    fn open_album(&self, name: &str) -> RepoResult<Option<Album>> {
        self.ensure_unambiguous_album(name)?;
        self.query_album(&album::open_album(name))
    }

    fn list_albums(&self) -> RepoResult<Vec<Album>> {
        self.query_albums(&album::get_albums())
    }

    fn list_albums_of_user(&self, user_id: UserId) -> RepoResult<Vec<Album>> {
        self.query_albums(&album::get_albums_of_user(user_id))
    }

    fn add_picture(&self, album_name: &str, new_picture: &NewPicture) -> RepoResult<Picture> {
        self.ensure_unambiguous_album(album_name)?;
        self.execute_expecting_rows(
            &picture::add_picture_to_album_by_name(album_name, new_picture),
            format!("album `{album_name}`"),
        )?;
        let picture_id = self.conn.last_insert_rowid();
        self.query_pictures(&picture::get_picture(picture_id))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                RepoError::InvalidData(format!("picture {picture_id} missing after insert"))
            })
    }

    fn remove_picture(&self, album_name: &str, picture_name: &str) -> RepoResult<()> {
        self.ensure_unambiguous_album(album_name)?;
        self.execute_expecting_rows(
            &picture::remove_picture_from_album_by_name(album_name, picture_name),
            format!("picture `{picture_name}` in album `{album_name}`"),
        )
    }

    fn tag_user(&self, album_name: &str, picture_name: &str, user_id: UserId) -> RepoResult<()> {
        self.ensure_unambiguous_album(album_name)?;
        self.execute_expecting_rows(
            &picture::tag_user_in_picture(album_name, picture_name, user_id),
            format!("picture `{picture_name}` in album `{album_name}`"),
        )
    }

    fn untag_user(
        &self,
        album_name: &str,
        picture_name: &str,
        user_id: UserId,
    ) -> RepoResult<()> {
        self.ensure_unambiguous_album(album_name)?;
        self.execute_expecting_rows(
            &picture::untag_user_in_picture(album_name, picture_name, user_id),
            format!("tag of user {user_id} on picture `{picture_name}` in album `{album_name}`"),
        )
    }

    fn count_albums_owned(&self, user_id: UserId) -> RepoResult<i64> {
        self.query_count(&stats::count_albums_owned_of_user(user_id))
    }

    fn count_albums_tagged(&self, user_id: UserId) -> RepoResult<i64> {
        self.query_count(&stats::count_albums_tagged_of_user(user_id))
    }

    fn count_tags(&self, user_id: UserId) -> RepoResult<i64> {
        self.query_count(&stats::count_tags_of_user(user_id))
    }

    fn average_tags_per_album(&self, user_id: UserId) -> RepoResult<Option<f64>> {
        let mut first = FirstRow::<AverageCell>::new();
        self.query(&stats::average_tags_per_album_of_user(user_id), &mut first)?;
        Ok(first.finish().and_then(|cell| cell.0))
    }

    fn top_tagged_user(&self) -> RepoResult<Option<User>> {
        let mut first = FirstRow::<User>::new();
        self.query(&user::get_top_tagged_user(), &mut first)?;
        Ok(first.finish())
    }

    fn top_tagged_picture(&self) -> RepoResult<Option<Picture>> {
        Ok(self
            .query_pictures(&picture::get_top_tagged_picture())?
            .into_iter()
            .next())
    }

    fn tagged_pictures_of_user(&self, user_id: UserId) -> RepoResult<Vec<Picture>> {
        self.query_pictures(&picture::get_tagged_pictures_of_user(user_id))
    }

    fn clear(&self) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for statement in query::clear() {
            tx.execute(statement.sql(), params_from_iter(statement.params()))?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{GalleryRepository, RepoError, SqliteGalleryRepository};
    use crate::db::open_db_in_memory;
    use crate::model::album::NewAlbum;
    use crate::model::picture::NewPicture;
    use crate::query::picture;
    use rusqlite::{params_from_iter, Connection};

    #[test]
    fn try_new_rejects_connection_without_gallery_tables() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteGalleryRepository::try_new(&conn).err().unwrap();
        assert!(matches!(err, RepoError::MissingRequiredTable("Users")));
    }

    #[test]
    fn create_album_reads_back_store_defaults() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteGalleryRepository::try_new(&conn).unwrap();
        let owner = repo.create_user("ari").unwrap();

        let album = repo.create_album(&NewAlbum::new("Trip", owner.id)).unwrap();
        assert!(album.id > 0);
        assert_eq!(album.user_id, owner.id);
        assert_eq!(album.creation_date.len(), "2024-01-01 00:00:00".len());
        assert!(album.pictures.is_empty());
    }

    #[test]
    fn zero_row_mutations_report_not_found() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteGalleryRepository::new(&conn);

        assert!(matches!(
            repo.delete_album("nothing", 1),
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(repo.rename_user(42, "x"), Err(RepoError::NotFound(_))));
    }

    #[test]
    fn shared_album_name_never_resolves_to_either_owner() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteGalleryRepository::new(&conn);
        let first = repo.create_user("first").unwrap();
        let second = repo.create_user("second").unwrap();
        repo.create_album(&NewAlbum::new("Trip", first.id)).unwrap();
        repo.add_picture("Trip", &NewPicture::new("beach", "/p/beach.jpg"))
            .unwrap();
        repo.create_album(&NewAlbum::new("Trip", second.id)).unwrap();

        assert!(matches!(
            repo.open_album("Trip"),
            Err(RepoError::AmbiguousAlbumName(_))
        ));
        // The statement alone touches nothing when the name is shared.
        let statement = picture::remove_picture_from_album_by_name("Trip", "beach");
        let changed = conn
            .execute(statement.sql(), params_from_iter(statement.params()))
            .unwrap();
        assert_eq!(changed, 0);
    }
}

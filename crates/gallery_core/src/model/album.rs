//! Album domain model and creation request.
//!
//! # Invariants
//! - `pictures` keeps insertion order and holds at most one picture per name.
//! - Every picture in `pictures` has `album_id == id`.

use crate::model::picture::Picture;
use crate::model::{require_creation_date, require_name, AlbumId, ModelValidationError, UserId};
use serde::{Deserialize, Serialize};

/// An album with the pictures it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub creation_date: String,
    /// Owner.
    pub user_id: UserId,
    pub pictures: Vec<Picture>,
}

impl Album {
    /// Looks up a picture by its album-unique name.
    pub fn picture(&self, name: &str) -> Option<&Picture> {
        self.pictures.iter().find(|picture| picture.name == name)
    }

    pub fn picture_mut(&mut self, name: &str) -> Option<&mut Picture> {
        self.pictures.iter_mut().find(|picture| picture.name == name)
    }

    pub fn has_picture(&self, name: &str) -> bool {
        self.picture(name).is_some()
    }
}

/// Caller input for creating an album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlbum {
    pub name: String,
    pub user_id: UserId,
    /// `None` lets the store stamp the current UTC time.
    pub creation_date: Option<String>,
}

impl NewAlbum {
    pub fn new(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            name: name.into(),
            user_id,
            creation_date: None,
        }
    }

    pub fn with_creation_date(mut self, creation_date: impl Into<String>) -> Self {
        self.creation_date = Some(creation_date.into());
        self
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_name("album", &self.name)?;
        require_creation_date("album", self.creation_date.as_deref())
    }
}

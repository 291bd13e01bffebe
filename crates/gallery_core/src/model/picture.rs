//! Picture domain model and creation request.
//!
//! # Invariants
//! - `tags` holds each tagged user at most once; order is irrelevant.
//! - `album_id` always names the owning album; pictures are never embedded
//!   in more than one album.

use crate::model::{
    require_creation_date, require_name, AlbumId, ModelValidationError, PictureId, UserId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A stored picture together with the users tagged in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub id: PictureId,
    pub name: String,
    /// Filesystem path of the image.
    pub location: String,
    pub creation_date: String,
    pub album_id: AlbumId,
    pub tags: BTreeSet<UserId>,
}

impl Picture {
    /// Adds a tag. Returns `false` when the user was already tagged.
    pub fn tag_user(&mut self, user_id: UserId) -> bool {
        self.tags.insert(user_id)
    }

    /// Removes a tag. Returns `false` when the user was not tagged.
    pub fn untag_user(&mut self, user_id: UserId) -> bool {
        self.tags.remove(&user_id)
    }

    pub fn is_user_tagged(&self, user_id: UserId) -> bool {
        self.tags.contains(&user_id)
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

/// Caller input for adding a picture to an album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPicture {
    pub name: String,
    pub location: String,
    /// `None` lets the store stamp the current UTC time.
    pub creation_date: Option<String>,
}

impl NewPicture {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            creation_date: None,
        }
    }

    pub fn with_creation_date(mut self, creation_date: impl Into<String>) -> Self {
        self.creation_date = Some(creation_date.into());
        self
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_name("picture", &self.name)?;
        if self.location.trim().is_empty() {
            return Err(ModelValidationError::EmptyLocation);
        }
        require_creation_date("picture", self.creation_date.as_deref())
    }
}

//! Folding flat join rows into nested gallery objects.
//!
//! # Responsibility
//! - Collapse one-to-many join expansions (album -> pictures -> tags) into a
//!   deduplicated object graph.
//! - Provide the per-query row visitors used by the SQLite repository.
//!
//! # Invariants
//! - A join producing N tag rows for one picture yields one picture with N
//!   tags, whatever the order of those rows.
//! - Inside an album, pictures are keyed by name and keep first-seen order.
//! - Album columns must agree across all rows of one album; a disagreement
//!   is a [`MaterializeError::Conflict`].
//! - An album whose outer join matched no picture has an empty collection.

use crate::model::album::Album;
use crate::model::picture::Picture;
use crate::model::{AlbumId, PictureId};
use crate::query::alias;
use crate::repo::row::{decode_row, parse_integer, DecodeColumns, DecodeError, RawRow};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MaterializeResult<T> = Result<T, MaterializeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializeError {
    Decode(DecodeError),
    /// Rows describing the same object disagree with each other.
    Conflict(String),
}

impl Display for MaterializeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "{err}"),
            Self::Conflict(message) => write!(f, "inconsistent result rows: {message}"),
        }
    }
}

impl Error for MaterializeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Conflict(_) => None,
        }
    }
}

impl From<DecodeError> for MaterializeError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

/// Per-query handler receiving every result row in order.
pub trait RowVisitor {
    fn visit_row(&mut self, row: &RawRow) -> MaterializeResult<()>;
}

/// Builds one album with its pictures and their tags.
#[derive(Debug, Default)]
pub struct AlbumMaterializer {
    album: Option<Album>,
}

impl AlbumMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the album, or `None` when no row was visited.
    pub fn finish(self) -> Option<Album> {
        self.album
    }
}

impl RowVisitor for AlbumMaterializer {
    fn visit_row(&mut self, row: &RawRow) -> MaterializeResult<()> {
        let mut header = Album::default();
        decode_row(row, &mut header)?;
        let mut scratch = Picture::default();
        decode_row(row, &mut scratch)?;

        if let Some(album) = self.album.as_ref() {
            ensure_same_header(album, &header)?;
        }
        let album = self.album.get_or_insert(header);
        merge_picture(album, scratch)
    }
}

fn ensure_same_header(album: &Album, header: &Album) -> MaterializeResult<()> {
    if album.id != header.id
        || album.name != header.name
        || album.creation_date != header.creation_date
        || album.user_id != header.user_id
    {
        return Err(MaterializeError::Conflict(format!(
            "album {} changed columns between rows",
            album.id
        )));
    }
    Ok(())
}

fn merge_picture(album: &mut Album, scratch: Picture) -> MaterializeResult<()> {
    // Outer join found no picture for this album.
    if scratch.name.is_empty() {
        return Ok(());
    }

    if scratch.album_id != album.id {
        return Err(MaterializeError::Conflict(format!(
            "picture {} belongs to album {}, not {}",
            scratch.id, scratch.album_id, album.id
        )));
    }

    let album_id = album.id;
    match album.picture_mut(&scratch.name) {
        Some(existing) if existing.id != scratch.id => Err(MaterializeError::Conflict(format!(
            "pictures {} and {} share one name in album {album_id}",
            existing.id, scratch.id
        ))),
        Some(existing) => {
            existing.tags.extend(scratch.tags);
            Ok(())
        }
        None => {
            album.pictures.push(scratch);
            Ok(())
        }
    }
}

/// Builds many albums from rows ordered or interleaved by album id.
#[derive(Debug, Default)]
pub struct AlbumListMaterializer {
    albums: Vec<AlbumMaterializer>,
    positions: HashMap<AlbumId, usize>,
}

impl AlbumListMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Albums in first-seen order.
    pub fn finish(self) -> Vec<Album> {
        self.albums
            .into_iter()
            .filter_map(AlbumMaterializer::finish)
            .collect()
    }
}

impl RowVisitor for AlbumListMaterializer {
    fn visit_row(&mut self, row: &RawRow) -> MaterializeResult<()> {
        let album_id = required_id(row, alias::ALBUM_ID)?;
        let position = match self.positions.get(&album_id) {
            Some(position) => *position,
            None => {
                self.albums.push(AlbumMaterializer::new());
                self.positions.insert(album_id, self.albums.len() - 1);
                self.albums.len() - 1
            }
        };
        self.albums[position].visit_row(row)
    }
}

/// Builds pictures with their tag sets, deduplicated by picture id.
#[derive(Debug, Default)]
pub struct PictureListMaterializer {
    pictures: Vec<Picture>,
    positions: HashMap<PictureId, usize>,
}

impl PictureListMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pictures in first-seen order.
    pub fn finish(self) -> Vec<Picture> {
        self.pictures
    }
}

impl RowVisitor for PictureListMaterializer {
    fn visit_row(&mut self, row: &RawRow) -> MaterializeResult<()> {
        let mut scratch = Picture::default();
        decode_row(row, &mut scratch)?;
        if scratch.name.is_empty() {
            return Ok(());
        }

        match self.positions.get(&scratch.id) {
            Some(position) => {
                let existing = &mut self.pictures[*position];
                if existing.name != scratch.name || existing.album_id != scratch.album_id {
                    return Err(MaterializeError::Conflict(format!(
                        "picture {} changed columns between rows",
                        scratch.id
                    )));
                }
                existing.tags.extend(scratch.tags);
            }
            None => {
                self.positions.insert(scratch.id, self.pictures.len());
                self.pictures.push(scratch);
            }
        }
        Ok(())
    }
}

/// Keeps only the first row, decoded into `T`.
#[derive(Debug, Default)]
pub struct FirstRow<T> {
    value: Option<T>,
}

impl<T: DecodeColumns + Default> FirstRow<T> {
    pub fn new() -> Self {
        Self { value: None }
    }

    pub fn finish(self) -> Option<T> {
        self.value
    }
}

impl<T: DecodeColumns + Default> RowVisitor for FirstRow<T> {
    fn visit_row(&mut self, row: &RawRow) -> MaterializeResult<()> {
        if self.value.is_none() {
            let mut value = T::default();
            decode_row(row, &mut value)?;
            self.value = Some(value);
        }
        Ok(())
    }
}

/// Decodes every row into its own `T`.
#[derive(Debug, Default)]
pub struct AllRows<T> {
    values: Vec<T>,
}

impl<T: DecodeColumns + Default> AllRows<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn finish(self) -> Vec<T> {
        self.values
    }
}

impl<T: DecodeColumns + Default> RowVisitor for AllRows<T> {
    fn visit_row(&mut self, row: &RawRow) -> MaterializeResult<()> {
        let mut value = T::default();
        decode_row(row, &mut value)?;
        self.values.push(value);
        Ok(())
    }
}

fn required_id(row: &RawRow, column: &'static str) -> MaterializeResult<i64> {
    let value = row
        .get(column)
        .ok_or_else(|| MaterializeError::Conflict(format!("row is missing `{column}`")))?;
    Ok(parse_integer(column, value)?)
}

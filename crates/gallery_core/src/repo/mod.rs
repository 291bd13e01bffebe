//! Repository layer: statement execution and result materialization.
//!
//! # Responsibility
//! - Execute built statements against the gallery connection.
//! - Turn flat rows into domain objects through typed row visitors.
//!
//! # Invariants
//! - Reads drain every row before returning; nothing is streamed to callers.
//! - Repository APIs report zero-row mutations as `NotFound`, and lookups
//!   that match nothing as `None`.

pub mod gallery_repo;
pub mod materialize;
pub mod row;

pub use gallery_repo::{GalleryRepository, RepoError, RepoResult, SqliteGalleryRepository};

//! Data access facade: the public gallery surface.
//!
//! # Responsibility
//! - Validate caller input before any statement is built.
//! - Delegate to the repository and translate failures into [`GalleryError`].
//! - Own the store connection as a scoped resource.
//!
//! # Invariants
//! - Every failure reaching a caller is one typed [`GalleryError`] kind.
//! - The connection is released exactly once, on `close` or on drop.

mod data_access;
mod database_access;
mod error;
mod shared;

pub use data_access::DataAccess;
pub use database_access::DatabaseAccess;
pub use error::{GalleryError, GalleryResult};
pub use shared::SharedDatabaseAccess;

//! Persistence and query core for the photo gallery.
//!
//! Builds parameterized statements, runs them on an embedded SQLite store
//! and folds join rows back into Albums, Pictures and tagged Users.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::GalleryConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::album::{Album, NewAlbum};
pub use model::picture::{NewPicture, Picture};
pub use model::user::User;
pub use model::{AlbumId, ModelValidationError, PictureId, UserId};
pub use repo::{GalleryRepository, RepoError, RepoResult, SqliteGalleryRepository};
pub use service::{DataAccess, DatabaseAccess, GalleryError, GalleryResult, SharedDatabaseAccess};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

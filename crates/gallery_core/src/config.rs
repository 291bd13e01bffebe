//! Runtime configuration for embedding the gallery core.
//!
//! Values come from defaults overlaid with `GALLERY_*` environment
//! variables; blank variables count as unset.

use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::service::{DatabaseAccess, GalleryResult};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE: &str = "galleryDB.sqlite";

pub const ENV_DB_PATH: &str = "GALLERY_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "GALLERY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GALLERY_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Store file; created with the full schema on first open.
    pub db_path: PathBuf,
    /// One of trace|debug|info|warn|error.
    pub log_level: String,
    /// Absolute log directory. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl GalleryConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            db_path: read(ENV_DB_PATH).map_or(defaults.db_path, PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from).or(defaults.log_dir),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns whether logging was started (or already active).
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }

    /// Opens the configured store.
    pub fn open(&self) -> GalleryResult<DatabaseAccess> {
        DatabaseAccess::open(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::{GalleryConfig, DEFAULT_DB_FILE, ENV_DB_PATH, ENV_LOG_DIR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn lookup_overlays_defaults_and_ignores_blank_values() {
        let env = HashMap::from([
            (ENV_DB_PATH, "/data/gallery.sqlite".to_string()),
            (ENV_LOG_DIR, "   ".to_string()),
        ]);
        let config = GalleryConfig::from_lookup(|key| env.get(key).cloned());

        assert_eq!(config.db_path, PathBuf::from("/data/gallery.sqlite"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, GalleryConfig::default().log_level);
    }

    #[test]
    fn logging_stays_off_without_directory() {
        let config = GalleryConfig::default();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE));
        assert!(!config.init_logging().unwrap());
    }
}

use crate::db::DbError;
use crate::model::ModelValidationError;
use crate::repo::row::DecodeError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GalleryResult<T> = Result<T, GalleryError>;

/// Failure kinds surfaced by the gallery facade. All are fatal to the call.
#[derive(Debug)]
pub enum GalleryError {
    /// Input rejected before a statement was built.
    Validation(ModelValidationError),
    /// The statement ran but matched no row.
    NotFound(String),
    /// A unique/foreign-key constraint fired, or result rows contradict
    /// each other.
    Integrity(String),
    /// A result column failed to parse as its expected type.
    Decode(DecodeError),
    /// Any other backend failure, including open failures.
    Store(RepoError),
}

impl GalleryError {
    /// Stable metadata-only code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Integrity(_) => "integrity",
            Self::Decode(_) => "decode",
            Self::Store(_) => "store",
        }
    }
}

impl Display for GalleryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid argument: {err}"),
            Self::NotFound(what) => write!(f, "{what} not found"),
            Self::Integrity(message) => write!(f, "integrity violation: {message}"),
            Self::Decode(err) => write!(f, "decode failure: {err}"),
            Self::Store(err) => write!(f, "store failure: {err}"),
        }
    }
}

impl Error for GalleryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Integrity(_) => None,
            Self::Decode(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ModelValidationError> for GalleryError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for GalleryError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) if err.is_constraint_violation() => {
                Self::Integrity(err.to_string())
            }
            RepoError::Decode(err) => Self::Decode(err),
            RepoError::NotFound(what) => Self::NotFound(what),
            RepoError::InvalidData(message) => Self::Integrity(message),
            ambiguous @ RepoError::AmbiguousAlbumName(_) => {
                Self::Integrity(ambiguous.to_string())
            }
            other => Self::Store(other),
        }
    }
}

impl From<DbError> for GalleryError {
    fn from(value: DbError) -> Self {
        Self::from(RepoError::Db(value))
    }
}

#[cfg(test)]
mod tests {
    use super::GalleryError;
    use crate::db::open_db_in_memory;
    use crate::repo::row::DecodeError;
    use crate::repo::RepoError;

    #[test]
    fn repo_errors_map_to_gallery_kinds() {
        let not_found = GalleryError::from(RepoError::NotFound("user 3".to_string()));
        assert_eq!(not_found.code(), "not_found");
        assert_eq!(not_found.to_string(), "user 3 not found");

        let conflict = GalleryError::from(RepoError::InvalidData("rows disagree".to_string()));
        assert_eq!(conflict.code(), "integrity");

        let missing = GalleryError::from(RepoError::MissingRequiredTable("Tags"));
        assert_eq!(missing.code(), "store");

        let ambiguous = GalleryError::from(RepoError::AmbiguousAlbumName("Trip".to_string()));
        assert_eq!(ambiguous.code(), "integrity");
        assert!(ambiguous.to_string().contains("ambiguous album name"));

        let decode = GalleryError::from(RepoError::Decode(DecodeError::InvalidInteger {
            column: "tag_user_id".to_string(),
            value: "abc".to_string(),
        }));
        assert!(matches!(
            decode,
            GalleryError::Decode(DecodeError::InvalidInteger { .. })
        ));
        assert_eq!(decode.code(), "decode");
    }

    #[test]
    fn constraint_violations_map_to_integrity() {
        let conn = open_db_in_memory().unwrap();
        let err = conn
            .execute(
                "INSERT INTO Albums (NAME, CREATION_DATE, USER_ID) VALUES ('a', 'now', 404);",
                [],
            )
            .unwrap_err();

        let mapped = GalleryError::from(RepoError::from(err));
        assert_eq!(mapped.code(), "integrity");

        let other = GalleryError::from(RepoError::from(rusqlite::Error::InvalidQuery));
        assert_eq!(other.code(), "store");
    }
}

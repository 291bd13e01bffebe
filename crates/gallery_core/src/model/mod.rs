//! Gallery domain model.
//!
//! # Responsibility
//! - Define the canonical User/Album/Picture shapes shared by every layer.
//! - Validate caller input before it reaches statement building.
//!
//! # Invariants
//! - Identifiers are assigned by the store and never reused.
//! - Tags are not a standalone type; they surface as `Picture::tags`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod album;
pub mod picture;
pub mod user;

/// Store-assigned user identifier.
pub type UserId = i64;
/// Store-assigned album identifier.
pub type AlbumId = i64;
/// Store-assigned picture identifier.
pub type PictureId = i64;

/// Input rejected before any statement is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A required name is empty or whitespace-only.
    EmptyName { entity: &'static str },
    /// A picture location is empty or whitespace-only.
    EmptyLocation,
    /// An explicit creation date was provided but is blank.
    EmptyCreationDate { entity: &'static str },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { entity } => write!(f, "{entity} name cannot be empty"),
            Self::EmptyLocation => write!(f, "picture location cannot be empty"),
            Self::EmptyCreationDate { entity } => {
                write!(f, "{entity} creation date cannot be blank when provided")
            }
        }
    }
}

impl Error for ModelValidationError {}

/// Rejects empty or whitespace-only names for `entity`.
pub fn require_name(entity: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::EmptyName { entity });
    }
    Ok(())
}

pub(crate) fn require_creation_date(
    entity: &'static str,
    value: Option<&str>,
) -> Result<(), ModelValidationError> {
    match value {
        Some(date) if date.trim().is_empty() => {
            Err(ModelValidationError::EmptyCreationDate { entity })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{require_name, ModelValidationError};

    #[test]
    fn require_name_rejects_blank_values() {
        assert_eq!(
            require_name("album", "  \t"),
            Err(ModelValidationError::EmptyName { entity: "album" })
        );
        assert!(require_name("album", "Summer").is_ok());
    }
}

//! User domain model.

use crate::model::UserId;
use serde::{Deserialize, Serialize};

/// A gallery user. Identity is `id`; `name` is display-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

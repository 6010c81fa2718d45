//! Author domain model.
//!
//! # Invariants
//! - `name` is unique across the catalog and acts as the lookup key.
//! - `born` is only changed through `set_born`.

use super::validation::{require_text, CatalogValidationError, AUTHOR_NAME_MIN_CHARS};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an author record.
pub type AuthorId = Uuid;

/// A person credited on one or more books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    /// Year of birth, unknown until set through `editAuthor`.
    pub born: Option<i32>,
}

impl Author {
    /// Creates an author with a generated id and no birth year.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an author with a caller-provided id.
    pub fn with_id(id: AuthorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            born: None,
        }
    }

    pub fn set_born(&mut self, year: i32) {
        self.born = Some(year);
    }

    /// Checks the constraints enforced before persistence.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        require_text("name", &self.name, AUTHOR_NAME_MIN_CHARS)
    }
}

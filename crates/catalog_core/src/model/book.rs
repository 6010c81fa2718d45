//! Book domain model.
//!
//! # Invariants
//! - `title` is unique across the catalog.
//! - `genres` keeps caller order; duplicates are allowed.
//! - Books are immutable once persisted.

use super::author::AuthorId;
use super::validation::{require_text, CatalogValidationError, BOOK_TITLE_MIN_CHARS};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a book record.
pub type BookId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Publication year, when known.
    pub published: Option<i32>,
    /// Reference to the crediting author; resolved at read time.
    pub author_id: AuthorId,
    pub genres: Vec<String>,
}

impl Book {
    /// Creates a book with a generated id, no publication year and no genres.
    pub fn new(title: impl Into<String>, author_id: AuthorId) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            published: None,
            author_id,
            genres: Vec::new(),
        }
    }

    /// Keeps the non-null genres of client input, in order.
    ///
    /// A blank entry is reported at its index in `raw`, nulls included.
    pub fn genres_from_input(
        raw: &[Option<String>],
    ) -> Result<Vec<String>, CatalogValidationError> {
        let mut genres = Vec::with_capacity(raw.len());
        for (position, entry) in raw.iter().enumerate() {
            let Some(genre) = entry else {
                continue;
            };
            if genre.trim().is_empty() {
                return Err(CatalogValidationError::BlankGenre { position });
            }
            genres.push(genre.clone());
        }
        Ok(genres)
    }

    /// Checks the constraints enforced before persistence.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        require_text("title", &self.title, BOOK_TITLE_MIN_CHARS)?;

        if let Some(position) = self.genres.iter().position(|genre| genre.trim().is_empty()) {
            return Err(CatalogValidationError::BlankGenre { position });
        }

        Ok(())
    }
}

//! Field-level validation shared by author and book records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shortest accepted author name, in characters.
pub const AUTHOR_NAME_MIN_CHARS: usize = 4;
/// Shortest accepted book title, in characters.
pub const BOOK_TITLE_MIN_CHARS: usize = 2;

/// Validation failure for a catalog record about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValidationError {
    /// A required text field is empty after trimming.
    MissingField(&'static str),
    /// A text field is shorter than its minimum length.
    TooShort {
        field: &'static str,
        min_chars: usize,
        actual_chars: usize,
    },
    /// One genre entry is blank.
    BlankGenre { position: usize },
}

impl Display for CatalogValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "`{field}` is required"),
            Self::TooShort {
                field,
                min_chars,
                actual_chars,
            } => write!(
                f,
                "`{field}` is shorter than the minimum allowed length ({actual_chars} < {min_chars})"
            ),
            Self::BlankGenre { position } => {
                write!(f, "genre at position {position} must not be blank")
            }
        }
    }
}

impl Error for CatalogValidationError {}

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    min_chars: usize,
) -> Result<(), CatalogValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogValidationError::MissingField(field));
    }

    let actual_chars = trimmed.chars().count();
    if actual_chars < min_chars {
        return Err(CatalogValidationError::TooShort {
            field,
            min_chars,
            actual_chars,
        });
    }

    Ok(())
}

//! Draft snapshot edited by the blog form.

use serde::{Deserialize, Serialize};

/// In-progress blog entry held by the form's caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogDraft {
    pub title: String,
    pub author: String,
    pub url: String,
}

/// One editable field of a `BlogDraft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Title,
    Author,
    Url,
}

impl DraftField {
    /// Fields in render order.
    pub const ALL: [DraftField; 3] = [Self::Title, Self::Author, Self::Url];

    /// Visible label next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Url => "url",
        }
    }

    /// `name` attribute of the rendered input.
    pub fn input_name(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Url => "URL",
        }
    }
}

impl BlogDraft {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            url: url.into(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Author => &self.author,
            DraftField::Url => &self.url,
        }
    }

    /// Returns a copy with exactly `field` replaced by `value`.
    pub fn with_field(&self, field: DraftField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            DraftField::Title => &mut next.title,
            DraftField::Author => &mut next.author,
            DraftField::Url => &mut next.url,
        };
        *slot = value.into();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::{BlogDraft, DraftField};

    #[test]
    fn with_field_leaves_the_source_untouched() {
        let draft = BlogDraft::new("Go To", "Dijkstra", "https://example.com/goto");
        let next = draft.with_field(DraftField::Url, "https://example.com/harmful");

        assert_eq!(draft.url, "https://example.com/goto");
        assert_eq!(next.get(DraftField::Url), "https://example.com/harmful");
    }

    #[test]
    fn url_input_name_is_upper_case() {
        assert_eq!(DraftField::Url.input_name(), "URL");
        assert_eq!(DraftField::Url.label(), "url");
    }
}

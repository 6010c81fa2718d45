//! Pure event handling for the blog form.
//!
//! # Invariants
//! - `reduce` never touches caller state; it only describes effects.
//! - `Create` submits exactly once; `Cancel` never submits.

use crate::draft::{BlogDraft, DraftField};
use crate::view::FormView;
use log::debug;
use serde::{Deserialize, Serialize};

/// User interaction with the rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormAction {
    /// A text input changed.
    Input { field: DraftField, value: String },
    /// The `create` button submitted the form.
    Create,
    /// The `cancel` button was clicked.
    Cancel,
}

/// State change requested from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FormEffect {
    SetDraft(BlogDraft),
    SetVisible(bool),
    Submit(BlogDraft),
}

/// Callbacks supplied by whoever owns the draft and the form's visibility.
pub trait BlogFormHandlers {
    fn set_new_blog(&mut self, draft: BlogDraft);
    fn set_visible(&mut self, visible: bool);
    fn handle_submit(&mut self, draft: BlogDraft);
}

/// Stateless "create new" blog form.
pub struct BlogForm;

impl BlogForm {
    pub fn view(draft: &BlogDraft) -> FormView {
        FormView::for_draft(draft)
    }

    /// Maps one action on `draft` to the effects the caller must apply, in
    /// order.
    pub fn reduce(draft: &BlogDraft, action: FormAction) -> Vec<FormEffect> {
        match action {
            FormAction::Input { field, value } => {
                debug!(
                    "event=draft_edit module=blog_form status=ok field={}",
                    field.label()
                );
                vec![FormEffect::SetDraft(draft.with_field(field, value))]
            }
            FormAction::Create => {
                debug!("event=draft_submit module=blog_form status=ok");
                vec![
                    FormEffect::SetVisible(false),
                    FormEffect::Submit(draft.clone()),
                ]
            }
            FormAction::Cancel => {
                debug!("event=draft_cancel module=blog_form status=ok");
                vec![FormEffect::SetVisible(false)]
            }
        }
    }

    /// Reduces `action` and applies the resulting effects to `handlers`.
    pub fn dispatch<H>(draft: &BlogDraft, action: FormAction, handlers: &mut H)
    where
        H: BlogFormHandlers + ?Sized,
    {
        for effect in Self::reduce(draft, action) {
            match effect {
                FormEffect::SetDraft(next) => handlers.set_new_blog(next),
                FormEffect::SetVisible(visible) => handlers.set_visible(visible),
                FormEffect::Submit(submitted) => handlers.handle_submit(submitted),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BlogForm, FormAction, FormEffect};
    use crate::draft::{BlogDraft, DraftField};

    #[test]
    fn input_replaces_only_the_edited_field() {
        let draft = BlogDraft::new("Old", "Ann", "https://a.example");
        let effects = BlogForm::reduce(
            &draft,
            FormAction::Input {
                field: DraftField::Title,
                value: "New".to_string(),
            },
        );

        assert_eq!(
            effects,
            vec![FormEffect::SetDraft(BlogDraft::new(
                "New",
                "Ann",
                "https://a.example"
            ))]
        );
    }
}

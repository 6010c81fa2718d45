//! Render description of the blog form.

use crate::draft::{BlogDraft, DraftField};
use serde::Serialize;

const HEADING: &str = "create new";

/// How a button interacts with the enclosing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    /// Triggers form submission.
    Submit,
    /// Plain button; never submits.
    Button,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub field: DraftField,
    pub label: &'static str,
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub text: &'static str,
    pub kind: ButtonKind,
}

/// Everything needed to paint the form for one draft snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub heading: &'static str,
    pub inputs: Vec<InputView>,
    pub buttons: Vec<ButtonView>,
}

impl FormView {
    pub(crate) fn for_draft(draft: &BlogDraft) -> Self {
        let inputs = DraftField::ALL
            .into_iter()
            .map(|field| InputView {
                field,
                label: field.label(),
                name: field.input_name(),
                value: draft.get(field).to_string(),
            })
            .collect();

        Self {
            heading: HEADING,
            inputs,
            buttons: vec![
                ButtonView {
                    text: "create",
                    kind: ButtonKind::Submit,
                },
                ButtonView {
                    text: "cancel",
                    kind: ButtonKind::Button,
                },
            ],
        }
    }

    pub fn input(&self, field: DraftField) -> Option<&InputView> {
        self.inputs.iter().find(|input| input.field == field)
    }
}

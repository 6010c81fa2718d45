//! Blog draft form as a pure view-model and reducer.
//!
//! # Responsibility
//! - Describe the "create new" blog form for a given draft snapshot.
//! - Turn user actions into effects for the caller that owns the draft.
//!
//! # Invariants
//! - The form owns no state; every render starts from a caller snapshot.
//! - Submission, visibility and draft storage are always the caller's job.

pub mod draft;
pub mod form;
pub mod view;

pub use draft::{BlogDraft, DraftField};
pub use form::{BlogForm, BlogFormHandlers, FormAction, FormEffect};
pub use view::{ButtonKind, ButtonView, FormView, InputView};

//! Selection, mode and draft state driving the note form UI.
//!
//! # Responsibility
//! - Own the note store on behalf of the composition root.
//! - Track which note is selected and whether the UI views, creates or edits.
//! - Gate every create/update behind draft validation.
//! - Schedule dismissal of validation alerts.
//!
//! # Invariants
//! - Session state is transient and never persisted.
//! - Saving, deleting, canceling or changing selection resets the draft.
//! - Selecting a note while creating or editing discards the draft.

pub mod alert;
mod controller;
pub mod mode;
pub mod view;

pub use alert::{Alert, Clock, ManualClock, SystemClock};
pub use controller::{Session, SessionError, SessionResult};
pub use mode::Mode;
pub use view::{FormView, NoteListItem, PreviewView};

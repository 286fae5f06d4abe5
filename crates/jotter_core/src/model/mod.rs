//! Domain model for notes and in-progress drafts.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the store.
//! - Define draft validation rules applied before any create/update.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` that is never reused.
//! - A draft with a blank title or blank content is never persisted.

pub mod draft;
pub mod note;

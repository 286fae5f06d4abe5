//! Note domain model.
//!
//! # Responsibility
//! - Define the record shared by the store, the persistence adapter and views.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes afterwards.
//! - Wire fields are exactly `id`, `title` and `content`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one note.
///
/// Random v4 UUIDs stay unique under rapid successive creation, unlike
/// wall-clock timestamps.
pub type NoteId = Uuid;

/// A user-authored record with a title and body content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Creates a note with a freshly generated identifier.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates a note with a caller-provided identifier.
    ///
    /// Used when identity already exists, e.g. decoding persisted data.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}

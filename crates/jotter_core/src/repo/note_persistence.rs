//! JSON persistence adapter for the note collection.
//!
//! # Responsibility
//! - Load the whole collection from one storage key.
//! - Overwrite that key with the whole collection after every mutation.
//!
//! # Invariants
//! - `load` never fails: absent, malformed or unreadable data yields `[]`.
//! - A decoded collection never contains two notes with the same id.
//! - Collection order survives an encode/decode round-trip.

use crate::config::NOTES_STORAGE_KEY;
use crate::model::note::{Note, NoteId};
use crate::storage::{KeyValueStore, StorageResult};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Persisted blob could not be turned into a valid collection.
#[derive(Debug)]
pub enum MalformedStorage {
    /// Not a JSON array of `{id, title, content}` objects.
    InvalidJson(serde_json::Error),
    /// Two entries share one identifier.
    DuplicateId(NoteId),
}

impl Display for MalformedStorage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "invalid notes payload: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate note id in payload: {id}"),
        }
    }
}

impl Error for MalformedStorage {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

/// Reads and writes the note collection under a fixed storage key.
pub struct NotePersistence<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> NotePersistence<S> {
    /// Binds the adapter to the default `"notes"` key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, NOTES_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the persisted collection.
    ///
    /// Degrades to an empty collection instead of failing; the reason is
    /// logged, never surfaced to the user.
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(
                    "event=notes_load module=persistence status=ok source=absent count=0 key={}",
                    self.key
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=persistence status=degraded error_code=storage_read_failed key={} error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        match decode_notes(&raw) {
            Ok(notes) => {
                info!(
                    "event=notes_load module=persistence status=ok source=stored count={} key={}",
                    notes.len(),
                    self.key
                );
                notes
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=persistence status=degraded error_code=malformed_storage key={} bytes={} error={}",
                    self.key,
                    raw.len(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Serializes the full collection and overwrites the stored blob.
    pub fn save(&mut self, notes: &[Note]) -> StorageResult<()> {
        let encoded = encode_notes(notes);
        self.store.set(&self.key, &encoded)
    }
}

/// Encodes a collection as a JSON array of `{id, title, content}`.
pub fn encode_notes(notes: &[Note]) -> String {
    // Serializing plain strings and UUIDs into a Vec cannot fail.
    serde_json::to_string(notes).unwrap_or_else(|_| "[]".to_string())
}

/// Decodes a persisted blob, rejecting anything that is not a valid collection.
pub fn decode_notes(raw: &str) -> Result<Vec<Note>, MalformedStorage> {
    let notes: Vec<Note> = serde_json::from_str(raw).map_err(MalformedStorage::InvalidJson)?;
    let mut seen = HashSet::with_capacity(notes.len());
    for note in &notes {
        if !seen.insert(note.id) {
            return Err(MalformedStorage::DuplicateId(note.id));
        }
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, encode_notes, MalformedStorage};
    use crate::model::note::Note;

    #[test]
    fn encode_uses_expected_wire_fields() {
        let note = Note::new("A", "x");
        let encoded = encode_notes(&[note.clone()]);
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value[0]["id"], note.id.to_string());
        assert_eq!(value[0]["title"], "A");
        assert_eq!(value[0]["content"], "x");
    }

    #[test]
    fn decode_rejects_non_array_payloads() {
        for raw in ["null", "{}", "\"notes\"", "[{\"title\":\"no id\"}]", "not json"] {
            let err = decode_notes(raw).unwrap_err();
            assert!(matches!(err, MalformedStorage::InvalidJson(_)), "{raw}");
        }
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let note = Note::new("A", "x");
        let raw = encode_notes(&[note.clone(), note.clone()]);
        let err = decode_notes(&raw).unwrap_err();
        assert!(matches!(err, MalformedStorage::DuplicateId(id) if id == note.id));
    }
}

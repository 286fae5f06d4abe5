//! Note collection store.
//!
//! # Responsibility
//! - Hold the ordered in-memory note collection.
//! - Provide create/update/delete/find operations.
//! - Persist the whole collection after every successful mutation.
//!
//! # Invariants
//! - No two notes share an id.
//! - Insertion order is preserved; update never moves a note.
//! - Memory and storage never diverge: a failed write rolls the mutation back.
//! - The store does not validate drafts; callers validate before mutating.

use crate::model::note::{Note, NoteId};
use crate::repo::note_persistence::NotePersistence;
use crate::storage::{KeyValueStore, StorageError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation failure.
#[derive(Debug)]
pub enum StoreError {
    /// Operation referenced an id absent from the collection.
    NotFound(NoteId),
    /// Persisting the mutated collection failed; the mutation was undone.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Storage(err) => write!(f, "failed to persist notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Authoritative owner of the note collection.
pub struct NoteStore<S: KeyValueStore> {
    notes: Vec<Note>,
    persistence: NotePersistence<S>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Builds a store from whatever the adapter can load.
    pub fn open(persistence: NotePersistence<S>) -> Self {
        let notes = persistence.load();
        Self { notes, persistence }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn persistence(&self) -> &NotePersistence<S> {
        &self.persistence
    }

    /// Looks up one note by id. No side effects.
    pub fn find_by_id(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Appends a new note with a fresh id and persists the collection.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> StoreResult<Note> {
        let mut note = Note::new(title, content);
        while self.position(note.id).is_some() {
            note = Note::new(note.title, note.content);
        }

        self.notes.push(note.clone());
        if let Err(err) = self.persistence.save(&self.notes) {
            self.notes.pop();
            return Err(persist_failed("note_create", note.id, err));
        }

        info!(
            "event=note_create module=store status=ok note_id={} count={}",
            note.id,
            self.notes.len()
        );
        Ok(note)
    }

    /// Replaces title and content of an existing note in place.
    pub fn update(
        &mut self,
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> StoreResult<Note> {
        let Some(index) = self.position(id) else {
            warn!("event=note_update module=store status=not_found note_id={id}");
            return Err(StoreError::NotFound(id));
        };

        let replacement = Note::with_id(id, title, content);
        let previous = std::mem::replace(&mut self.notes[index], replacement);
        if let Err(err) = self.persistence.save(&self.notes) {
            self.notes[index] = previous;
            return Err(persist_failed("note_update", id, err));
        }

        let updated = self.notes[index].clone();
        info!(
            "event=note_update module=store status=ok note_id={} title_len={} content_len={}",
            id,
            updated.title.len(),
            updated.content.len()
        );
        Ok(updated)
    }

    /// Removes a note and persists the remainder. Returns the removed note.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<Note> {
        let Some(index) = self.position(id) else {
            warn!("event=note_delete module=store status=not_found note_id={id}");
            return Err(StoreError::NotFound(id));
        };

        let removed = self.notes.remove(index);
        if let Err(err) = self.persistence.save(&self.notes) {
            self.notes.insert(index, removed);
            return Err(persist_failed("note_delete", id, err));
        }

        info!(
            "event=note_delete module=store status=ok note_id={} count={}",
            id,
            self.notes.len()
        );
        Ok(removed)
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }
}

fn persist_failed(event: &str, id: NoteId, err: StorageError) -> StoreError {
    error!(
        "event={} module=store status=error error_code=persist_failed note_id={} error={}",
        event, id, err
    );
    StoreError::Storage(err)
}

//! Persistence adapters between the in-memory collection and storage.
//!
//! # Responsibility
//! - Serialize the note collection into one key-value entry and back.
//! - Isolate the wire encoding from store/session orchestration.
//!
//! # Invariants
//! - Adapters never mutate the caller's collection; they copy.
//! - Unreadable persisted data degrades to an empty collection on load.

pub mod note_persistence;

//! Core use-case services.
//!
//! # Responsibility
//! - Own the authoritative note collection and keep storage in sync with it.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod note_store;

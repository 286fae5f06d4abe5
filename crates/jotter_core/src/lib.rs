//! Core domain logic for Jotter.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod storage;

pub use config::{ConfigError, ConfigOverrides, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::draft::{validate_draft, validation_messages, Draft, DraftIssue};
pub use model::note::{Note, NoteId};
pub use repo::note_persistence::{decode_notes, encode_notes, MalformedStorage, NotePersistence};
pub use service::note_store::{NoteStore, StoreError, StoreResult};
pub use session::{
    Alert, Clock, FormView, ManualClock, Mode, NoteListItem, PreviewView, Session, SessionError,
    SessionResult, SystemClock,
};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note pane's UI actions to Dart via FRB.
//! - Translate core errors into simple response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The Dart side owns the `NotesSession` handle; there is no process-wide
//!   session state on the Rust side.
//! - Note ids cross the boundary as hyphenated UUID strings.

use jotter_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ConfigOverrides, CoreConfig, NotePersistence, PreviewView, Session, SessionError,
    SqliteKeyValueStore,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the note session backed by a SQLite file.
///
/// `db_path = None` resolves `JOTTER_DB_PATH`, then a temp-dir default.
///
/// # FFI contract
/// - Sync call; performs DB open and migrations.
/// - Never panics; returns an error message when storage cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn open_notes_session(db_path: Option<String>) -> Result<NotesSession, String> {
    let overrides = ConfigOverrides {
        db_path: db_path
            .map(|raw| raw.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from),
        ..ConfigOverrides::default()
    };
    let config = CoreConfig::resolve(overrides).map_err(|err| err.to_string())?;
    config
        .prepare_storage_dir()
        .map_err(|err| err.to_string())?;
    let store = SqliteKeyValueStore::open(&config.db_path)
        .map_err(|err| format!("open_notes_session failed: {err}"))?;

    Ok(NotesSession {
        inner: Mutex::new(Session::open(NotePersistence::new(store))),
    })
}

/// Opaque note session owned by the Dart side.
#[flutter_rust_bridge::frb(opaque)]
pub struct NotesSession {
    inner: Mutex<Session<SqliteKeyValueStore>>,
}

/// Generic action response envelope for note pane actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether the action was applied.
    pub ok: bool,
    /// Affected note ID, when the action targets one.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Validation messages to show in the alert, in display order.
    pub validation_messages: Vec<String>,
    /// Token to pass to `dismiss_alert` once the alert's display time ends.
    pub alert_generation: Option<u64>,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
            validation_messages: Vec::new(),
            alert_generation: None,
        }
    }

    fn failure(err: &SessionError) -> Self {
        let validation_messages = match err {
            SessionError::Validation(issues) => {
                issues.iter().map(|issue| issue.to_string()).collect()
            }
            _ => Vec::new(),
        };
        Self {
            ok: false,
            note_id: None,
            message: err.to_string(),
            validation_messages,
            alert_generation: None,
        }
    }
}

/// One note list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListRow {
    pub note_id: String,
    pub title: String,
    pub active: bool,
}

/// Preview pane state, flattened for Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPane {
    /// `message|note|form`.
    pub kind: String,
    /// Placeholder text for `message`, form heading for `form`.
    pub heading: Option<String>,
    pub note_id: Option<String>,
    pub title: String,
    pub content: String,
    /// Submit button label for `form`.
    pub submit_label: Option<String>,
}

/// Full render state for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// `viewing|creating|editing`.
    pub mode: String,
    pub selected_id: Option<String>,
    pub items: Vec<NoteListRow>,
    pub preview: PreviewPane,
    pub alert_messages: Vec<String>,
    pub alert_generation: Option<u64>,
}

impl NotesSession {
    /// Opens an empty creation form.
    #[flutter_rust_bridge::frb(sync)]
    pub fn add_note(&self) -> NoteActionResponse {
        self.lock().add_note();
        NoteActionResponse::success("Creating note.", None)
    }

    /// Selects a note by ID; an open form is discarded.
    #[flutter_rust_bridge::frb(sync)]
    pub fn select_note(&self, note_id: String) -> NoteActionResponse {
        let Ok(id) = Uuid::parse_str(note_id.trim()) else {
            warn!("event=select_note module=ffi status=error error_code=invalid_note_id");
            return NoteActionResponse {
                ok: false,
                note_id: None,
                message: format!("invalid note id: `{note_id}`"),
                validation_messages: Vec::new(),
                alert_generation: None,
            };
        };
        match self.lock().select_note(id) {
            Ok(()) => NoteActionResponse::success("Note selected.", Some(id.to_string())),
            Err(err) => NoteActionResponse::failure(&err),
        }
    }

    /// Opens the edit form for the selected note.
    #[flutter_rust_bridge::frb(sync)]
    pub fn edit_note(&self) -> NoteActionResponse {
        let mut session = self.lock();
        match session.edit_note() {
            Ok(()) => NoteActionResponse::success(
                "Editing note.",
                session.mode().selected().map(|id| id.to_string()),
            ),
            Err(err) => NoteActionResponse::failure(&err),
        }
    }

    /// Deletes the selected note.
    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_note(&self) -> NoteActionResponse {
        match self.lock().delete_note() {
            Ok(removed) => {
                NoteActionResponse::success("Note deleted.", Some(removed.id.to_string()))
            }
            Err(err) => NoteActionResponse::failure(&err),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn change_title(&self, text: String) -> NoteActionResponse {
        match self.lock().change_title(text) {
            Ok(()) => NoteActionResponse::success("", None),
            Err(err) => NoteActionResponse::failure(&err),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn change_content(&self, text: String) -> NoteActionResponse {
        match self.lock().change_content(text) {
            Ok(()) => NoteActionResponse::success("", None),
            Err(err) => NoteActionResponse::failure(&err),
        }
    }

    /// Validates and saves the open form.
    ///
    /// On validation failure the response carries the alert messages and the
    /// generation token for scheduling `dismiss_alert`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn save_note(&self) -> NoteActionResponse {
        let mut session = self.lock();
        match session.save_note() {
            Ok(saved) => NoteActionResponse::success("Note saved.", Some(saved.id.to_string())),
            Err(err) => {
                let mut response = NoteActionResponse::failure(&err);
                // Only a validation failure raises an alert; any other one
                // still visible belongs to an earlier attempt.
                if matches!(err, SessionError::Validation(_)) {
                    response.alert_generation = session.alert().map(|alert| alert.generation());
                }
                response
            }
        }
    }

    /// Closes the open form without saving.
    #[flutter_rust_bridge::frb(sync)]
    pub fn cancel(&self) -> NoteActionResponse {
        self.lock().cancel();
        NoteActionResponse::success("Form closed.", None)
    }

    /// Dismisses the alert raised as `generation`; stale tokens are ignored.
    #[flutter_rust_bridge::frb(sync)]
    pub fn dismiss_alert(&self, generation: u64) -> bool {
        self.lock().dismiss_alert(generation)
    }

    /// Returns the render state, dropping an alert whose display time ended.
    #[flutter_rust_bridge::frb(sync)]
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut session = self.lock();
        session.tick();

        let mode = session.mode();
        let items = session
            .list_items()
            .into_iter()
            .map(|item| NoteListRow {
                note_id: item.id.to_string(),
                title: item.title,
                active: item.active,
            })
            .collect();
        let (alert_messages, alert_generation) = match session.alert() {
            Some(alert) => (alert.messages().to_vec(), Some(alert.generation())),
            None => (Vec::new(), None),
        };

        SessionSnapshot {
            mode: mode.label().to_string(),
            selected_id: mode.selected().map(|id| id.to_string()),
            items,
            preview: to_preview_pane(session.preview()),
            alert_messages,
            alert_generation,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session<SqliteKeyValueStore>> {
        // Store mutations roll back on failure; a poisoned session is consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_preview_pane(preview: PreviewView) -> PreviewPane {
    match preview {
        PreviewView::Message(message) => PreviewPane {
            kind: "message".to_string(),
            heading: Some(message.to_string()),
            note_id: None,
            title: String::new(),
            content: String::new(),
            submit_label: None,
        },
        PreviewView::Note(note) => PreviewPane {
            kind: "note".to_string(),
            heading: None,
            note_id: Some(note.id.to_string()),
            title: note.title,
            content: note.content,
            submit_label: None,
        },
        PreviewView::Form(form) => PreviewPane {
            kind: "form".to_string(),
            heading: Some(form.heading.to_string()),
            note_id: None,
            title: form.title,
            content: form.content,
            submit_label: Some(form.submit_label.to_string()),
        },
    }
}

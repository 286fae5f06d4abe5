//! Session controller: the UI-facing operations.
//!
//! # Responsibility
//! - Map add/select/edit/delete/change/save/cancel actions onto the store.
//! - Enforce the mode transitions of the note pane.
//!
//! # Invariants
//! - `save_note` validates first; an invalid draft never reaches the store.
//! - Failed operations leave mode and draft untouched.
//! - `NotFound` is logged and returned, never fatal.

use super::alert::{Alert, AlertSlot, Clock, SystemClock};
use super::mode::Mode;
use crate::config::ALERT_DISPLAY_DURATION;
use crate::model::draft::{validation_messages, Draft, DraftIssue};
use crate::model::note::{Note, NoteId};
use crate::repo::note_persistence::NotePersistence;
use crate::service::note_store::{NoteStore, StoreError};
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Why a UI action was not applied.
#[derive(Debug)]
pub enum SessionError {
    /// Draft failed validation; an alert was raised.
    Validation(Vec<DraftIssue>),
    /// Action referenced a note that no longer exists.
    NotFound(NoteId),
    /// Action needs a selected note.
    NoSelection,
    /// Action is not available in the current mode.
    InvalidMode {
        action: &'static str,
        mode: &'static str,
    },
    /// Draft edits and saves need an open form.
    NoActiveForm,
    /// Persisting the change failed; nothing was applied.
    Storage(StorageError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(issues) => write!(f, "{}", validation_messages(issues).join(" ")),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::NoSelection => write!(f, "no note is selected"),
            Self::InvalidMode { action, mode } => {
                write!(f, "`{action}` is not available while {mode}")
            }
            Self::NoActiveForm => write!(f, "no note form is open"),
            Self::Storage(err) => write!(f, "failed to persist notes: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Storage(err) => Self::Storage(err),
        }
    }
}

/// Note collection plus transient UI state, owned by the composition root.
pub struct Session<S: KeyValueStore, C: Clock = SystemClock> {
    store: NoteStore<S>,
    mode: Mode,
    draft: Draft,
    alerts: AlertSlot,
    clock: C,
}

impl<S: KeyValueStore> Session<S, SystemClock> {
    /// Loads the collection and starts in `Viewing { selected: None }`.
    pub fn open(persistence: NotePersistence<S>) -> Self {
        Self::with_clock(NoteStore::open(persistence), SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    pub fn with_clock(store: NoteStore<S>, clock: C) -> Self {
        info!(
            "event=session_start module=session status=ok count={}",
            store.len()
        );
        Self {
            store,
            mode: Mode::default(),
            draft: Draft::default(),
            alerts: AlertSlot::new(ALERT_DISPLAY_DURATION),
            clock,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    /// Note currently selected, if it still exists.
    pub fn selected_note(&self) -> Option<&Note> {
        self.mode
            .selected()
            .and_then(|id| self.store.find_by_id(id))
    }

    /// Opens an empty creation form, abandoning any in-progress draft.
    pub fn add_note(&mut self) {
        self.reset_to(Mode::Creating, "add_note");
    }

    /// Opens the edit form for the selected note, pre-filled from it.
    pub fn edit_note(&mut self) -> SessionResult<()> {
        let id = match self.mode {
            Mode::Viewing { selected: Some(id) } => id,
            Mode::Viewing { selected: None } => return Err(SessionError::NoSelection),
            other => return Err(invalid_mode("edit_note", other)),
        };
        let Some(note) = self.store.find_by_id(id) else {
            warn!("event=edit_note module=session status=not_found note_id={id}");
            return Err(SessionError::NotFound(id));
        };

        self.draft = Draft::new(note.title.clone(), note.content.clone());
        self.transition(Mode::Editing { selected: id }, "edit_note");
        Ok(())
    }

    /// Replaces the draft title.
    pub fn change_title(&mut self, text: impl Into<String>) -> SessionResult<()> {
        self.ensure_form()?;
        self.draft.title = text.into();
        Ok(())
    }

    /// Replaces the draft content.
    pub fn change_content(&mut self, text: impl Into<String>) -> SessionResult<()> {
        self.ensure_form()?;
        self.draft.content = text.into();
        Ok(())
    }

    /// Validates the draft and creates or updates the note.
    ///
    /// On success the saved note becomes selected in `Viewing` mode. On
    /// validation failure an alert is raised and the form stays open.
    pub fn save_note(&mut self) -> SessionResult<Note> {
        if !self.mode.is_form() {
            return Err(SessionError::NoActiveForm);
        }

        let issues = self.draft.validate();
        if !issues.is_empty() {
            let generation = self
                .alerts
                .raise(validation_messages(&issues), self.clock.now());
            info!(
                "event=save_note module=session status=rejected mode={} issues={} alert_generation={}",
                self.mode.label(),
                issues.len(),
                generation
            );
            return Err(SessionError::Validation(issues));
        }

        let title = self.draft.title.clone();
        let content = self.draft.content.clone();
        let saved = match self.mode {
            Mode::Editing { selected } => self.store.update(selected, title, content)?,
            _ => self.store.create(title, content)?,
        };

        self.reset_to(
            Mode::Viewing {
                selected: Some(saved.id),
            },
            "save_note",
        );
        Ok(saved)
    }

    /// Selects a note for viewing.
    ///
    /// Selecting while creating or editing discards the draft.
    pub fn select_note(&mut self, id: NoteId) -> SessionResult<()> {
        if self.store.find_by_id(id).is_none() {
            warn!("event=select_note module=session status=not_found note_id={id}");
            return Err(SessionError::NotFound(id));
        }
        if self.mode.is_form() {
            debug!(
                "event=draft_discard module=session reason=select_note mode={}",
                self.mode.label()
            );
        }
        self.reset_to(Mode::Viewing { selected: Some(id) }, "select_note");
        Ok(())
    }

    /// Deletes the selected note and clears the selection.
    pub fn delete_note(&mut self) -> SessionResult<Note> {
        let id = match self.mode {
            Mode::Viewing { selected: Some(id) } | Mode::Editing { selected: id } => id,
            Mode::Viewing { selected: None } => return Err(SessionError::NoSelection),
            Mode::Creating => return Err(invalid_mode("delete_note", self.mode)),
        };

        let removed = self.store.delete(id)?;
        self.reset_to(Mode::Viewing { selected: None }, "delete_note");
        Ok(removed)
    }

    /// Closes the form without saving.
    pub fn cancel(&mut self) {
        match self.mode {
            Mode::Creating => self.reset_to(Mode::Viewing { selected: None }, "cancel"),
            Mode::Editing { selected } => self.reset_to(
                Mode::Viewing {
                    selected: Some(selected),
                },
                "cancel",
            ),
            Mode::Viewing { .. } => {}
        }
    }

    /// Currently visible alert, if its display window has not elapsed.
    pub fn alert(&self) -> Option<&Alert> {
        self.alerts.visible(self.clock.now())
    }

    /// Runs the scheduled alert dismissal when it is due.
    ///
    /// Returns `true` when an alert was dismissed.
    pub fn tick(&mut self) -> bool {
        let dismissed = self.alerts.dismiss_expired(self.clock.now());
        if dismissed {
            debug!("event=alert_dismiss module=session reason=expired");
        }
        dismissed
    }

    /// Dismisses the alert raised as `generation`; stale generations are ignored.
    pub fn dismiss_alert(&mut self, generation: u64) -> bool {
        self.alerts.dismiss(generation)
    }

    fn ensure_form(&self) -> SessionResult<()> {
        if self.mode.is_form() {
            Ok(())
        } else {
            Err(SessionError::NoActiveForm)
        }
    }

    fn reset_to(&mut self, next: Mode, action: &'static str) {
        self.draft.clear();
        self.alerts.clear();
        self.transition(next, action);
    }

    fn transition(&mut self, next: Mode, action: &'static str) {
        debug!(
            "event=mode_change module=session action={} from={} to={}",
            action,
            self.mode.label(),
            next.label()
        );
        self.mode = next;
    }
}

fn invalid_mode(action: &'static str, mode: Mode) -> SessionError {
    SessionError::InvalidMode {
        action,
        mode: mode.label(),
    }
}

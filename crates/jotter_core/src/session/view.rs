//! Read models for the presentation layer.
//!
//! Views are pure projections of session state; rendering them never
//! changes the session.

use super::alert::Clock;
use super::controller::Session;
use super::mode::Mode;
use crate::model::note::{Note, NoteId};
use crate::storage::KeyValueStore;

pub const EMPTY_COLLECTION_MESSAGE: &str = "There are no notes!";
pub const NO_SELECTION_MESSAGE: &str = "Please, choose a note";
pub const CREATE_FORM_HEADING: &str = "Add new Note";
pub const EDIT_FORM_HEADING: &str = "Edit Note";
pub const CREATE_SUBMIT_LABEL: &str = "Save";
pub const EDIT_SUBMIT_LABEL: &str = "Edit";

/// One row of the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: NoteId,
    pub title: String,
    /// Whether this row is the current selection.
    pub active: bool,
}

/// Open create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub title: String,
    pub content: String,
}

/// Content of the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView {
    /// Placeholder text.
    Message(&'static str),
    /// Read-only selected note.
    Note(Note),
    /// Draft form.
    Form(FormView),
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    /// Note list rows in collection order.
    pub fn list_items(&self) -> Vec<NoteListItem> {
        let selected = self.mode().selected();
        self.notes()
            .iter()
            .map(|note| NoteListItem {
                id: note.id,
                title: note.title.clone(),
                active: selected == Some(note.id),
            })
            .collect()
    }

    /// What the preview pane should show for the current mode.
    pub fn preview(&self) -> PreviewView {
        let (heading, submit_label) = match self.mode() {
            Mode::Creating => (CREATE_FORM_HEADING, CREATE_SUBMIT_LABEL),
            Mode::Editing { .. } => (EDIT_FORM_HEADING, EDIT_SUBMIT_LABEL),
            Mode::Viewing { .. } => {
                if self.notes().is_empty() {
                    return PreviewView::Message(EMPTY_COLLECTION_MESSAGE);
                }
                return match self.selected_note() {
                    Some(note) => PreviewView::Note(note.clone()),
                    None => PreviewView::Message(NO_SELECTION_MESSAGE),
                };
            }
        };

        PreviewView::Form(FormView {
            heading,
            submit_label,
            title: self.draft().title.clone(),
            content: self.draft().content.clone(),
        })
    }
}

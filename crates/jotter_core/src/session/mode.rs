//! UI mode of a session.

use crate::model::note::NoteId;

/// What the note pane is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Showing the selected note, or a placeholder when nothing is selected.
    Viewing { selected: Option<NoteId> },
    /// Filling the form for a note that does not exist yet.
    Creating,
    /// Filling the form for an existing note.
    Editing { selected: NoteId },
}

impl Default for Mode {
    fn default() -> Self {
        Self::Viewing { selected: None }
    }
}

impl Mode {
    /// Note highlighted in the list, if any.
    pub fn selected(&self) -> Option<NoteId> {
        match self {
            Self::Viewing { selected } => *selected,
            Self::Creating => None,
            Self::Editing { selected } => Some(*selected),
        }
    }

    /// Whether the draft form is open.
    pub fn is_form(&self) -> bool {
        matches!(self, Self::Creating | Self::Editing { .. })
    }

    /// Stable label used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Viewing { .. } => "viewing",
            Self::Creating => "creating",
            Self::Editing { .. } => "editing",
        }
    }
}

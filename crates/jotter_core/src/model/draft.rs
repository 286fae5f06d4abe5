//! Draft model and validation.
//!
//! # Responsibility
//! - Hold the unsaved title/content pair edited in the form.
//! - Report which draft fields block a save.
//!
//! # Invariants
//! - Issues are reported in field order: title first, then content.
//! - Validation is pure and never touches storage.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// In-progress, unsaved title/content pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Validates this draft; see [`validate_draft`].
    pub fn validate(&self) -> Vec<DraftIssue> {
        validate_draft(&self.title, &self.content)
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

/// One reason a draft cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftIssue {
    /// Title is empty or whitespace-only.
    TitleRequired,
    /// Content is empty or whitespace-only.
    ContentRequired,
}

impl DraftIssue {
    /// User-facing message for this issue.
    pub fn message(self) -> &'static str {
        match self {
            Self::TitleRequired => "Title is required.",
            Self::ContentRequired => "Content is required.",
        }
    }
}

impl Display for DraftIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for DraftIssue {}

/// Checks that both draft fields are non-blank after trimming whitespace.
///
/// Returns an empty vector when the draft may be saved.
pub fn validate_draft(title: &str, content: &str) -> Vec<DraftIssue> {
    let mut issues = Vec::new();
    if title.trim().is_empty() {
        issues.push(DraftIssue::TitleRequired);
    }
    if content.trim().is_empty() {
        issues.push(DraftIssue::ContentRequired);
    }
    issues
}

/// Renders issues as user-facing messages, preserving order.
pub fn validation_messages(issues: &[DraftIssue]) -> Vec<String> {
    issues.iter().map(|issue| issue.message().to_string()).collect()
}

//! Note snapshot and submission intents.
//!
//! # Invariants
//! - `id` is assigned by SQLite `AUTOINCREMENT` and never changes.
//! - `done` is only ever flipped by the toggle path, never set by edits.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier. Always positive for persisted rows.
pub type NoteId = i64;

/// Immutable snapshot of one `notes` row at the time of the last refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// `None` when the column is SQL `NULL`.
    pub details: Option<String>,
    pub done: bool,
}

/// What a caller wants to happen to the note list.
///
/// Replaces the "id 0 means new" convention with an explicit variant while
/// [`Intent::from_submission`] keeps accepting the sentinel form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Create a note. Ignored when `title` is empty.
    NewNote {
        title: String,
        details: Option<String>,
    },
    /// Replace title and details of an existing note.
    EditNote {
        id: NoteId,
        title: String,
        details: Option<String>,
    },
}

impl Intent {
    /// Maps an edit-form submission onto an intent.
    ///
    /// # Contract
    /// - `id == 0` (or any non-positive value) means "new note".
    /// - A positive `id` means "edit that note"; existence is not checked here.
    pub fn from_submission(
        id: NoteId,
        title: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        let title = title.into();
        if id > 0 {
            Self::EditNote { id, title, details }
        } else {
            Self::NewNote { title, details }
        }
    }

    /// Whether this intent targets an existing row.
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::EditNote { .. })
    }
}

/// Returns whether a title is acceptable for creating a note.
///
/// Only the empty string is rejected; whitespace is a real title.
pub fn has_title(title: &str) -> bool {
    !title.is_empty()
}

#[cfg(test)]
mod tests {
    use super::{has_title, Intent, Note};

    #[test]
    fn zero_id_submission_becomes_new_note() {
        let intent = Intent::from_submission(0, "X", None);
        assert_eq!(
            intent,
            Intent::NewNote {
                title: "X".to_string(),
                details: None
            }
        );
        assert!(!intent.is_edit());
    }

    #[test]
    fn positive_id_submission_becomes_edit() {
        let intent = Intent::from_submission(7, "Y", Some("more".to_string()));
        assert!(intent.is_edit());
        assert!(matches!(intent, Intent::EditNote { id: 7, .. }));
    }

    #[test]
    fn negative_id_is_treated_as_new() {
        assert!(!Intent::from_submission(-3, "Z", None).is_edit());
    }

    #[test]
    fn only_empty_titles_are_rejected() {
        assert!(!has_title(""));
        assert!(has_title("   \t"));
        assert!(has_title(" Buy milk "));
    }

    #[test]
    fn note_serializes_with_plain_field_names() {
        let note = Note {
            id: 1,
            title: "Buy milk".to_string(),
            details: None,
            done: false,
        };
        let json = serde_json::to_value(&note).expect("note should serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["done"], false);
        assert!(json["details"].is_null());
    }
}

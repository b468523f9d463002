//! Core data layer for Notebox.
//! Persists notes in SQLite and keeps an in-memory list in step with the store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{ConfigError, NoteboxConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Intent, Note, NoteId};
pub use repo::note_store::{NoteStore, SqliteNoteStore, StoreError, StoreResult};
pub use service::note_sync::{NoteSync, SyncOutcome};
pub use view::{NoteList, NoteListView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

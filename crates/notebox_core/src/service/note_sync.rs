//! Note sync engine: intent-level operations over a note store.
//!
//! # Responsibility
//! - Translate caller intents into exactly one store mutation each.
//! - Refresh the in-memory list after every mutation, before returning.
//! - Contain storage faults: log them and hand them back as outcomes.
//!
//! # Invariants
//! - Operations take `&mut self`, so a refresh always completes before the
//!   next mutation is accepted on the same store handle.
//! - The view is only replaced by a successful `query_all`; a fault keeps the
//!   last good list.
//! - Create/edit routing comes from the caller's intent, never from an
//!   existence check in the store.

use crate::model::note::{has_title, Intent, NoteId};
use crate::repo::note_store::{NoteStore, StoreError, StoreResult};
use crate::view::{NoteList, NoteListView};
use log::{debug, error, info};
use std::sync::mpsc::Receiver;
use std::time::Instant;

/// Result of one sync operation. Faults are reported here instead of `Err`.
#[must_use]
#[derive(Debug)]
pub enum SyncOutcome {
    /// Mutation (if any) ran and the view was refreshed.
    ///
    /// `matched` is `false` when the targeted id did not exist; the store was
    /// left unchanged and the refresh reflects that.
    Applied { matched: bool },
    /// Nothing was written because the title was empty.
    Skipped,
    /// The store failed; the view still shows the previous list.
    Faulted(StoreError),
}

impl SyncOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self, Self::Faulted(_))
    }
}

/// Sync engine owning one store handle and the list view it feeds.
pub struct NoteSync<S: NoteStore> {
    store: S,
    view: NoteListView,
}

impl<S: NoteStore> NoteSync<S> {
    /// Wraps a store. The view starts empty until the first refresh.
    pub fn new(store: S) -> Self {
        Self {
            store,
            view: NoteListView::new(),
        }
    }

    /// Wraps a store and loads the initial list.
    ///
    /// The sync engine is returned even when the first load fails; the
    /// outcome tells the caller whether the view is populated.
    pub fn start(store: S) -> (Self, SyncOutcome) {
        let mut sync = Self::new(store);
        let outcome = sync.refresh();
        (sync, outcome)
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the list from the last successful refresh.
    pub fn current(&self) -> NoteList {
        self.view.current()
    }

    /// Registers a refresh listener; it receives one list per completed refresh.
    pub fn subscribe(&mut self) -> Receiver<NoteList> {
        self.view.subscribe()
    }

    /// Creates a note. Empty titles are skipped without touching the store.
    pub fn create(&mut self, title: &str, details: Option<&str>) -> SyncOutcome {
        if !has_title(title) {
            debug!("event=note_create module=sync status=skipped reason=empty_title");
            return SyncOutcome::Skipped;
        }

        self.mutate_then_refresh("note_create", None, |store| {
            store.insert(title, details).map(|_| true)
        })
    }

    /// Replaces title and details of note `id`. Unknown ids are a no-op.
    pub fn update(&mut self, id: NoteId, title: &str, details: Option<&str>) -> SyncOutcome {
        self.mutate_then_refresh("note_update", Some(id), |store| {
            store.update(id, title, details)
        })
    }

    /// Routes an intent to create or update.
    pub fn apply(&mut self, intent: Intent) -> SyncOutcome {
        match intent {
            Intent::NewNote { title, details } => self.create(&title, details.as_deref()),
            Intent::EditNote { id, title, details } => {
                self.update(id, &title, details.as_deref())
            }
        }
    }

    /// Single edit-form entry point: `id == 0` creates, a positive id edits.
    pub fn apply_edit(&mut self, id: NoteId, title: &str, details: Option<&str>) -> SyncOutcome {
        self.apply(Intent::from_submission(
            id,
            title,
            details.map(str::to_string),
        ))
    }

    /// Flips the done flag of note `id`.
    pub fn toggle(&mut self, id: NoteId) -> SyncOutcome {
        self.mutate_then_refresh("note_toggle", Some(id), |store| store.toggle_done(id))
    }

    /// Permanently deletes note `id`.
    pub fn remove(&mut self, id: NoteId) -> SyncOutcome {
        self.mutate_then_refresh("note_delete", Some(id), |store| store.delete(id))
    }

    /// Re-reads the whole store and replaces the view in one step.
    pub fn refresh(&mut self) -> SyncOutcome {
        match self.reload() {
            Ok(()) => SyncOutcome::Applied { matched: true },
            Err(err) => SyncOutcome::Faulted(err),
        }
    }

    // Caller-facing names used by UI bindings.

    pub fn submit_new_note(&mut self, title: &str, details: Option<&str>) -> SyncOutcome {
        self.create(title, details)
    }

    pub fn submit_edit(&mut self, id: NoteId, title: &str, details: Option<&str>) -> SyncOutcome {
        self.apply_edit(id, title, details)
    }

    pub fn toggle_done(&mut self, id: NoteId) -> SyncOutcome {
        self.toggle(id)
    }

    pub fn delete_note(&mut self, id: NoteId) -> SyncOutcome {
        self.remove(id)
    }

    pub fn get_current_list(&self) -> NoteList {
        self.current()
    }

    fn mutate_then_refresh(
        &mut self,
        event: &'static str,
        id: Option<NoteId>,
        mutation: impl FnOnce(&mut S) -> StoreResult<bool>,
    ) -> SyncOutcome {
        let started_at = Instant::now();
        let matched = match mutation(&mut self.store) {
            Ok(matched) => matched,
            Err(err) => {
                error!(
                    "event={} module=sync status=error id={} duration_ms={} error_code=store_mutation_failed error={}",
                    event,
                    display_id(id),
                    started_at.elapsed().as_millis(),
                    err
                );
                return SyncOutcome::Faulted(err);
            }
        };

        if !matched {
            debug!(
                "event={} module=sync status=noop id={} reason=id_not_found",
                event,
                display_id(id)
            );
        }

        if let Err(err) = self.reload() {
            return SyncOutcome::Faulted(err);
        }

        info!(
            "event={} module=sync status=ok id={} matched={} notes={} duration_ms={}",
            event,
            display_id(id),
            matched,
            self.view.len(),
            started_at.elapsed().as_millis()
        );
        SyncOutcome::Applied { matched }
    }

    fn reload(&mut self) -> StoreResult<()> {
        match self.store.query_all() {
            Ok(notes) => {
                self.view.replace(notes);
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=notes_refresh module=sync status=error error_code=store_query_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }
}

fn display_id(id: Option<NoteId>) -> String {
    id.map_or_else(|| "new".to_string(), |value| value.to_string())
}

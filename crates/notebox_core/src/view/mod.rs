//! In-memory note list mirrored from the store.
//!
//! # Responsibility
//! - Hold the ordered list produced by the last successful refresh.
//! - Fan each new list out to subscribers.
//!
//! # Invariants
//! - The list is only ever replaced wholesale; there is no per-item mutator.
//! - `replace` is crate-private and reached only through the sync engine's
//!   refresh step.
//! - Readers holding an older `Arc` keep a consistent old snapshot.

use crate::model::note::Note;
use log::debug;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Shared, immutable list snapshot.
pub type NoteList = Arc<[Note]>;

/// Read-only view over the current note list.
#[derive(Debug)]
pub struct NoteListView {
    notes: NoteList,
    subscribers: Vec<Sender<NoteList>>,
}

impl Default for NoteListView {
    fn default() -> Self {
        Self {
            notes: Arc::from(Vec::new()),
            subscribers: Vec::new(),
        }
    }
}

impl NoteListView {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the list from the last refresh.
    pub fn current(&self) -> NoteList {
        Arc::clone(&self.notes)
    }

    /// Number of notes in the current snapshot.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Registers a receiver that gets every future list, one per refresh.
    pub fn subscribe(&mut self) -> Receiver<NoteList> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Swaps in a freshly queried list and notifies subscribers.
    ///
    /// Subscribers whose receiver has been dropped are pruned.
    pub(crate) fn replace(&mut self, notes: Vec<Note>) {
        self.notes = Arc::from(notes);
        let before = self.subscribers.len();
        let snapshot = &self.notes;
        self.subscribers
            .retain(|subscriber| subscriber.send(Arc::clone(snapshot)).is_ok());
        let pruned = before - self.subscribers.len();
        if pruned > 0 {
            debug!("event=view_prune module=view status=ok pruned={pruned}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoteListView;
    use crate::model::note::Note;

    fn note(id: i64, done: bool) -> Note {
        Note {
            id,
            title: format!("note {id}"),
            details: None,
            done,
        }
    }

    #[test]
    fn replace_swaps_whole_list_and_keeps_old_snapshots_intact() {
        let mut view = NoteListView::new();
        view.replace(vec![note(1, false), note(2, false)]);
        let before = view.current();

        view.replace(vec![note(2, false)]);
        let after = view.current();

        assert_eq!(before.len(), 2);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, 2);
    }

    #[test]
    fn subscribers_receive_one_message_per_replace() {
        let mut view = NoteListView::new();
        let rx = view.subscribe();

        view.replace(vec![note(1, false)]);
        view.replace(vec![note(1, true)]);

        let first = rx.try_recv().expect("first publish");
        let second = rx.try_recv().expect("second publish");
        assert!(!first[0].done);
        assert!(second[0].done);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut view = NoteListView::new();
        let rx = view.subscribe();
        drop(rx);
        let kept = view.subscribe();

        view.replace(vec![note(1, false)]);

        assert_eq!(view.subscribers.len(), 1);
        assert!(kept.try_recv().is_ok());
    }
}

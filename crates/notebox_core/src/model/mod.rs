//! Domain model for persisted notes and caller intents.
//!
//! # Responsibility
//! - Define the note snapshot shared by store, sync engine and view.
//! - Define the caller-facing intent union used instead of sentinel ids.
//!
//! # Invariants
//! - Every note is identified by a store-assigned `NoteId`.
//! - Deletion is a hard delete; ids are never handed out twice.

pub mod note;

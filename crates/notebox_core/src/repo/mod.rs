//! Persistence layer for notes.
//!
//! # Responsibility
//! - Define the raw statement contract used by the sync engine.
//! - Isolate SQL details from orchestration.
//!
//! # Invariants
//! - Store APIs never apply business rules (title checks live in the service).
//! - Unknown ids are not errors at this layer.

pub mod note_store;

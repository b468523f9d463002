//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into intent-level note operations.
//! - Keep callers decoupled from storage details.

pub mod note_sync;

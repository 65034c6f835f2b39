//! Note domain model.
//!
//! # Responsibility
//! - Define the typed note record persisted by the store.
//! - Own the second-precision timestamp representation used on disk.
//!
//! # Invariants
//! - Every note is identified by a non-nil `NoteId`.
//! - Timestamps order chronologically and render as `YYYY-MM-DD HH:MM:SS`.

pub mod note;

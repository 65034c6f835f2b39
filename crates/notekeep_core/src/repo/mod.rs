//! Repository layer for the note collection.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by services.
//! - Isolate file format details from use-case orchestration.
//!
//! # Invariants
//! - `load` returns notes in persisted (insertion) order.
//! - `save` replaces the entire persisted collection.

pub mod note_repo;

//! Note repository contract with JSON-file and in-memory implementations.
//!
//! # Responsibility
//! - Provide collection-level persistence for `NoteService`.
//! - Keep the storage location as explicit configuration.
//!
//! # Invariants
//! - No partial updates: every write carries the full collection.
//! - Implementations keep no state that outlives the backing store.

use crate::config::StoreConfig;
use crate::model::note::Note;
use crate::store::{load_notes, save_notes, StoreResult};
use std::path::Path;

/// Whole-collection persistence contract.
pub trait NoteRepository {
    /// Reads every persisted note in insertion order.
    fn load(&self) -> StoreResult<Vec<Note>>;
    /// Replaces the persisted collection with `notes`.
    fn save(&mut self, notes: &[Note]) -> StoreResult<()>;
}

/// Repository backed by one JSON file.
///
/// Reads the file on every `load`; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct JsonNoteRepository {
    config: StoreConfig,
}

impl JsonNoteRepository {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Path of the backing JSON document.
    pub fn path(&self) -> &Path {
        self.config.notes_path()
    }
}

impl NoteRepository for JsonNoteRepository {
    fn load(&self) -> StoreResult<Vec<Note>> {
        load_notes(self.path())
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        save_notes(self.path(), notes)
    }
}

/// Volatile repository that also counts writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryNoteRepository {
    notes: Vec<Note>,
    save_count: usize,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with an existing collection.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            save_count: 0,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of `save` calls observed so far.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl NoteRepository for MemoryNoteRepository {
    fn load(&self) -> StoreResult<Vec<Note>> {
        Ok(self.notes.clone())
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        self.notes = notes.to_vec();
        self.save_count += 1;
        Ok(())
    }
}

//! Store location configuration.
//!
//! The backing file path is handed to repositories explicitly instead of
//! living in a process-wide constant.

use std::path::{Path, PathBuf};

/// File name used when no explicit location is configured.
pub const DEFAULT_NOTES_FILE: &str = "notes.json";

/// Where the note collection lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub notes_path: PathBuf,
}

impl StoreConfig {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
        }
    }

    pub fn notes_path(&self) -> &Path {
        self.notes_path.as_path()
    }
}

impl Default for StoreConfig {
    /// `notes.json` relative to the working directory.
    fn default() -> Self {
        Self::new(DEFAULT_NOTES_FILE)
    }
}

//! JSON file storage for the note collection.
//!
//! # Responsibility
//! - Read and write the whole note collection as one JSON document.
//! - Translate I/O and decode failures into semantic store errors.
//!
//! # Invariants
//! - A missing backing file reads as an empty collection.
//! - Malformed or invalid content is never repaired or skipped.
//! - Writes replace the full file; there is no atomic rename.

use crate::model::note::NoteValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;

pub use json_file::{load_notes, save_notes};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid {
        path: PathBuf,
        source: NoteValidationError,
    },
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to access note store `{}`: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "malformed note store `{}`: {source}", path.display())
            }
            Self::Invalid { path, source } => {
                write!(f, "invalid note in store `{}`: {source}", path.display())
            }
            Self::Serialize(source) => write!(f, "failed to encode notes: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Invalid { source, .. } => Some(source),
            Self::Serialize(source) => Some(source),
        }
    }
}

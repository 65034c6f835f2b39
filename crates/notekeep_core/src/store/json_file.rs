//! Whole-file JSON load/save.
//!
//! # Responsibility
//! - Decode the persisted array into typed notes and validate each one.
//! - Encode the collection with 4-space indentation and overwrite the file.
//!
//! # Invariants
//! - Note content (title/body) never reaches the log; only counts and paths.

use super::{StoreError, StoreResult};
use crate::model::note::Note;
use log::{error, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

const JSON_INDENT: &[u8] = b"    ";

/// Loads the full note collection from `path`.
///
/// Returns an empty collection when the file does not exist.
///
/// # Errors
/// - `StoreError::Io` when the file exists but cannot be read.
/// - `StoreError::Malformed` when content is not an array of notes.
/// - `StoreError::Invalid` when a decoded note breaks a model invariant.
pub fn load_notes(path: &Path) -> StoreResult<Vec<Note>> {
    let started_at = Instant::now();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=store_load module=store status=ok source=missing count=0 path={}",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=error error_code=io_failed path={} error={}",
                path.display(),
                err
            );
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    let notes: Vec<Note> = match serde_json::from_slice(&bytes) {
        Ok(notes) => notes,
        Err(err) => {
            error!(
                "event=store_load module=store status=error error_code=malformed path={} error={}",
                path.display(),
                err
            );
            return Err(StoreError::Malformed {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    for note in &notes {
        if let Err(err) = note.validate() {
            error!(
                "event=store_load module=store status=error error_code=invalid_note path={} error={}",
                path.display(),
                err
            );
            return Err(StoreError::Invalid {
                path: path.to_path_buf(),
                source: err,
            });
        }
    }

    info!(
        "event=store_load module=store status=ok source=file count={} duration_ms={}",
        notes.len(),
        started_at.elapsed().as_millis()
    );
    Ok(notes)
}

/// Overwrites `path` with the full note collection.
///
/// Missing parent directories are created. A crash mid-write can leave a
/// truncated file behind.
pub fn save_notes(path: &Path, notes: &[Note]) -> StoreResult<()> {
    let started_at = Instant::now();
    let encoded = encode_notes(notes)?;

    let write_result = ensure_parent_dir(path).and_then(|()| fs::write(path, &encoded));
    if let Err(err) = write_result {
        error!(
            "event=store_save module=store status=error error_code=io_failed path={} error={}",
            path.display(),
            err
        );
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: err,
        });
    }

    info!(
        "event=store_save module=store status=ok count={} bytes={} duration_ms={}",
        notes.len(),
        encoded.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

fn encode_notes(notes: &[Note]) -> StoreResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    notes
        .serialize(&mut serializer)
        .map_err(StoreError::Serialize)?;
    Ok(buffer)
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_notes, load_notes, save_notes};
    use crate::model::note::{Note, NoteTimestamp};
    use crate::store::StoreError;

    fn sample_note() -> Note {
        Note::new(
            "Groceries",
            "milk,eggs",
            NoteTimestamp::parse("2024-05-01 10:00:00").unwrap(),
        )
    }

    #[test]
    fn encode_uses_four_space_indent() {
        let encoded = String::from_utf8(encode_notes(&[sample_note()]).unwrap()).unwrap();
        assert!(encoded.starts_with("[\n    {\n        \"id\": "));
    }

    #[test]
    fn encode_empty_collection_is_empty_array() {
        assert_eq!(encode_notes(&[]).unwrap(), b"[]");
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("notes.json");

        save_notes(&path, &[sample_note()]).unwrap();
        assert_eq!(load_notes(&path).unwrap().len(), 1);
    }

    #[test]
    fn load_reports_directory_as_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_notes(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "unexpected error: {err}");
    }
}

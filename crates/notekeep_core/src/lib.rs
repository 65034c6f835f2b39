//! Core domain logic for notekeep.
//! This crate is the single source of truth for note storage invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{StoreConfig, DEFAULT_NOTES_FILE};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status, LogLevel};
pub use model::note::{
    parse_note_id, Note, NoteId, NoteTimestamp, NoteValidationError, TimestampError,
    TIMESTAMP_FORMAT,
};
pub use repo::note_repo::{JsonNoteRepository, MemoryNoteRepository, NoteRepository};
pub use service::clock::{Clock, SystemClock};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

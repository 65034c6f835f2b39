//! Note CRUD use-case service.
//!
//! # Responsibility
//! - Provide create/list/find/edit/delete over a whole-collection repository.
//! - Stamp notes with the configured clock on create and edit.
//!
//! # Invariants
//! - Every mutation is load entire collection -> mutate -> save entire
//!   collection.
//! - `edit` saves only when the target exists; `delete` always saves.
//! - `list_sorted` orders by timestamp descending; equal timestamps list the
//!   most recently inserted note first. The sorted view is never persisted.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::service::clock::{Clock, SystemClock};
use crate::store::StoreError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service stamping notes with the local wall clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: NoteRepository, C: Clock> NoteService<R, C> {
    /// Creates a service with an explicit time source.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Appends a new note with a fresh id and the current time.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> NoteServiceResult<Note> {
        let mut notes = self.repo.load()?;
        let note = Note::new(title, body, self.clock.now());
        notes.push(note.clone());
        self.repo.save(&notes)?;

        info!(
            "event=note_create module=service status=ok note_id={} count={}",
            note.id,
            notes.len()
        );
        Ok(note)
    }

    /// Returns all notes, newest timestamp first.
    pub fn list_sorted(&self) -> NoteServiceResult<Vec<Note>> {
        let mut notes = self.repo.load()?;
        // Stable sort over the reversed collection puts later inserts first
        // among equal timestamps.
        notes.reverse();
        notes.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
        Ok(notes)
    }

    /// Looks up one note by id.
    pub fn find(&self, id: NoteId) -> NoteServiceResult<Option<Note>> {
        let notes = self.repo.load()?;
        Ok(notes.into_iter().find(|note| note.id == id))
    }

    /// Replaces title and body of an existing note and re-stamps it.
    ///
    /// # Errors
    /// - `NoteServiceError::NoteNotFound` when no note has `id`; nothing is
    ///   written in that case.
    pub fn edit(
        &mut self,
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> NoteServiceResult<Note> {
        let mut notes = self.repo.load()?;
        let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
            warn!("event=note_edit module=service status=error error_code=not_found note_id={id}");
            return Err(NoteServiceError::NoteNotFound(id));
        };

        note.revise(title, body, self.clock.now());
        let updated = note.clone();
        self.repo.save(&notes)?;

        info!("event=note_edit module=service status=ok note_id={id}");
        Ok(updated)
    }

    /// Removes every note with `id` and saves the result, even if nothing
    /// matched. Returns how many notes were removed.
    pub fn delete(&mut self, id: NoteId) -> NoteServiceResult<usize> {
        let mut notes = self.repo.load()?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        let removed = before - notes.len();
        self.repo.save(&notes)?;

        info!(
            "event=note_delete module=service status=ok note_id={id} removed={removed} count={}",
            notes.len()
        );
        Ok(removed)
    }
}

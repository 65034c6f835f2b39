//! Time source for note stamping.

use crate::model::note::NoteTimestamp;

/// Supplies the timestamp written on create and edit.
pub trait Clock {
    fn now(&self) -> NoteTimestamp;
}

/// Local wall clock, second precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NoteTimestamp {
        NoteTimestamp::now_local()
    }
}

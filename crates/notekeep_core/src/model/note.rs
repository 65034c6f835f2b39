//! Note record and timestamp types.
//!
//! # Responsibility
//! - Define the canonical note shape stored in the JSON collection.
//! - Provide the textual timestamp codec shared by storage and display.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `id` is never the nil UUID.
//! - `timestamp` carries no sub-second component.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a note.
pub type NoteId = Uuid;

/// Textual layout of persisted and displayed timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Validation errors for note invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Nil UUID is reserved and cannot identify a note.
    NilId,
    /// Id text is not a lowercase hyphenated UUID.
    NonCanonicalId(String),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be the nil uuid"),
            Self::NonCanonicalId(raw) => {
                write!(f, "note id `{raw}` is not a lowercase hyphenated uuid")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// Timestamp text that is not exactly `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    Unparsable(chrono::ParseError),
    /// Parsed, but renders differently (e.g. missing zero padding).
    NonCanonical,
}

impl Display for TimestampError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unparsable(err) => write!(f, "{err}"),
            Self::NonCanonical => write!(f, "fields must be zero-padded"),
        }
    }
}

impl Error for TimestampError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unparsable(err) => Some(err),
            Self::NonCanonical => None,
        }
    }
}

/// Parses a note id in its persisted form.
///
/// Only the lowercase hyphenated layout is accepted, so a loaded id always
/// saves back byte-for-byte.
pub fn parse_note_id(raw: &str) -> Result<NoteId, NoteValidationError> {
    let non_canonical = || NoteValidationError::NonCanonicalId(raw.to_string());
    let id = Uuid::parse_str(raw).map_err(|_| non_canonical())?;
    if id.hyphenated().to_string() != raw {
        return Err(non_canonical());
    }
    Ok(id)
}

fn deserialize_note_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NoteId, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_note_id(raw.as_str()).map_err(D::Error::custom)
}

/// Local wall-clock time truncated to whole seconds.
///
/// Serialized as `YYYY-MM-DD HH:MM:SS`. Ordering is chronological, which
/// matches lexical ordering of the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteTimestamp(NaiveDateTime);

impl NoteTimestamp {
    /// Current local time with sub-second precision dropped.
    pub fn now_local() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Wraps a naive datetime, truncating it to whole seconds.
    pub fn from_datetime(value: NaiveDateTime) -> Self {
        Self(value.trunc_subsecs(0))
    }

    /// Parses the persisted `YYYY-MM-DD HH:MM:SS` form, zero padding included.
    pub fn parse(value: &str) -> Result<Self, TimestampError> {
        let parsed = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(TimestampError::Unparsable)?;
        if parsed.to_string() != value {
            return Err(TimestampError::NonCanonical);
        }
        Ok(parsed)
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl Display for NoteTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for NoteTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoteTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw.as_str()).map_err(|err| {
            D::Error::custom(format!(
                "invalid timestamp `{raw}`, expected YYYY-MM-DD HH:MM:SS: {err}"
            ))
        })
    }
}

/// One titled, timestamped text record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable identity, generated at creation.
    #[serde(deserialize_with = "deserialize_note_id")]
    pub id: NoteId,
    pub title: String,
    pub body: String,
    /// Creation time, or time of the latest edit.
    pub timestamp: NoteTimestamp,
}

impl Note {
    /// Creates a note with a freshly generated v4 id.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        timestamp: NoteTimestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            timestamp,
        }
    }

    /// Creates a note with a caller-provided id.
    ///
    /// # Errors
    /// - `NoteValidationError::NilId` when `id` is nil.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
        timestamp: NoteTimestamp,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            id,
            title: title.into(),
            body: body.into(),
            timestamp,
        };
        note.validate()?;
        Ok(note)
    }

    /// Checks record invariants that serde alone cannot express.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        Ok(())
    }

    /// Replaces title and body and re-stamps the note. `id` is untouched.
    pub fn revise(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        timestamp: NoteTimestamp,
    ) {
        self.title = title.into();
        self.body = body.into();
        self.timestamp = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_note_id, Note, NoteTimestamp, NoteValidationError, TimestampError};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NoteTimestamp {
        NoteTimestamp::from_datetime(
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_milli_opt(h, m, s, 750)
                .unwrap(),
        )
    }

    #[test]
    fn timestamp_drops_subseconds_and_renders_fixed_layout() {
        assert_eq!(at(7, 5, 3).to_string(), "2024-03-09 07:05:03");
    }

    #[test]
    fn timestamp_parse_accepts_persisted_layout_only() {
        let parsed = NoteTimestamp::parse("2024-03-09 07:05:03").expect("layout should parse");
        assert_eq!(parsed, at(7, 5, 3));
        assert!(NoteTimestamp::parse("2024-03-09T07:05:03").is_err());
        assert!(NoteTimestamp::parse("yesterday").is_err());
    }

    #[test]
    fn timestamp_parse_rejects_unpadded_fields() {
        assert_eq!(
            NoteTimestamp::parse("2024-5-1 9:0:0").unwrap_err(),
            TimestampError::NonCanonical
        );
        assert_eq!(
            NoteTimestamp::parse("2024-03-09 7:05:03").unwrap_err(),
            TimestampError::NonCanonical
        );
    }

    #[test]
    fn parse_note_id_accepts_only_lowercase_hyphenated() {
        let canonical = "11111111-2222-4333-8444-55555555555a";
        assert_eq!(parse_note_id(canonical).unwrap().to_string(), canonical);

        for raw in [
            "11111111-2222-4333-8444-55555555555A",
            "{11111111-2222-4333-8444-55555555555a}",
            "11111111222243338444555555555555",
            "note-1",
        ] {
            assert_eq!(
                parse_note_id(raw).unwrap_err(),
                NoteValidationError::NonCanonicalId(raw.to_string())
            );
        }
    }

    #[test]
    fn timestamp_order_is_chronological() {
        assert!(at(9, 0, 0) > at(8, 59, 59));
    }

    #[test]
    fn revise_keeps_id() {
        let mut note = Note::new("a", "b", at(1, 0, 0));
        let id = note.id;
        note.revise("c", "d", at(2, 0, 0));
        assert_eq!(note.id, id);
        assert_eq!(note.title, "c");
        assert_eq!(note.body, "d");
        assert_eq!(note.timestamp, at(2, 0, 0));
    }
}

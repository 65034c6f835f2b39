use notekeep_core::{
    Clock, JsonNoteRepository, MemoryNoteRepository, Note, NoteRepository, NoteService,
    NoteServiceError, NoteTimestamp, StoreConfig, StoreError,
};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::fs;
use uuid::Uuid;

/// Hands out pre-arranged timestamps in order.
struct ScriptedClock {
    times: RefCell<VecDeque<NoteTimestamp>>,
}

impl ScriptedClock {
    fn new(times: &[&str]) -> Self {
        Self {
            times: RefCell::new(times.iter().map(|value| ts(value)).collect()),
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> NoteTimestamp {
        self.times
            .borrow_mut()
            .pop_front()
            .expect("scripted clock ran out of timestamps")
    }
}

fn ts(value: &str) -> NoteTimestamp {
    NoteTimestamp::parse(value).unwrap()
}

fn json_service(dir: &tempfile::TempDir) -> NoteService<JsonNoteRepository> {
    let config = StoreConfig::new(dir.path().join("notes.json"));
    NoteService::new(JsonNoteRepository::new(config))
}

#[test]
fn create_then_list_returns_note_with_fresh_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = json_service(&dir);
    let existing = service.create("first", "one").unwrap();

    let created = service.create("Groceries", "milk,eggs").unwrap();
    assert_ne!(created.id, existing.id);

    let listed = service.list_sorted().unwrap();
    let found = listed
        .iter()
        .find(|note| note.id == created.id)
        .expect("created note should be listed");
    assert_eq!(found.title, "Groceries");
    assert_eq!(found.body, "milk,eggs");
}

#[test]
fn n_creates_yield_n_unique_notes() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = json_service(&dir);

    for idx in 0..25 {
        service.create(format!("note {idx}"), "body").unwrap();
    }

    let notes = service.list_sorted().unwrap();
    assert_eq!(notes.len(), 25);
    let ids: HashSet<Uuid> = notes.iter().map(|note| note.id).collect();
    assert_eq!(ids.len(), 25);
}

#[test]
fn list_sorted_is_non_increasing_for_any_insert_order() {
    let stamps = [
        "2024-01-03 09:00:00",
        "2023-12-31 23:59:59",
        "2024-01-03 09:00:00",
        "2024-01-01 00:00:00",
        "2024-02-29 12:30:45",
    ];
    let orders: [[usize; 5]; 4] = [
        [0, 1, 2, 3, 4],
        [4, 3, 2, 1, 0],
        [2, 4, 0, 3, 1],
        [1, 0, 4, 2, 3],
    ];

    for order in orders {
        let notes: Vec<Note> = order
            .iter()
            .map(|&idx| Note::new(format!("n{idx}"), "", ts(stamps[idx])))
            .collect();
        let service = NoteService::new(MemoryNoteRepository::with_notes(notes));

        let sorted = service.list_sorted().unwrap();
        assert_eq!(sorted.len(), stamps.len());
        for pair in sorted.windows(2) {
            assert!(
                pair[0].timestamp >= pair[1].timestamp,
                "order {order:?} produced {} before {}",
                pair[0].timestamp,
                pair[1].timestamp
            );
        }
    }
}

#[test]
fn list_sorted_does_not_reorder_persisted_collection() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("notes.json"));
    let clock = ScriptedClock::new(&["2024-01-01 00:00:00", "2024-01-02 00:00:00"]);
    let mut service = NoteService::with_clock(JsonNoteRepository::new(config), clock);
    service.create("old", "").unwrap();
    service.create("new", "").unwrap();

    let sorted = service.list_sorted().unwrap();
    assert_eq!(sorted[0].title, "new");

    let persisted = service.repository().load().unwrap();
    assert_eq!(persisted[0].title, "old");
    assert_eq!(persisted[1].title, "new");
}

#[test]
fn edit_updates_target_and_leaves_others_untouched() {
    let clock = ScriptedClock::new(&[
        "2024-01-01 08:00:00",
        "2024-01-01 09:00:00",
        "2024-01-01 10:00:00",
        "2024-01-02 11:00:00",
    ]);
    let mut service = NoteService::with_clock(MemoryNoteRepository::new(), clock);
    let first = service.create("a", "1").unwrap();
    let target = service.create("b", "2").unwrap();
    let last = service.create("c", "3").unwrap();

    let edited = service.edit(target.id, "b2", "22").unwrap();
    assert_eq!(edited.id, target.id);
    assert_eq!(edited.title, "b2");
    assert_eq!(edited.body, "22");
    assert_eq!(edited.timestamp, ts("2024-01-02 11:00:00"));

    let stored = service.repository().notes();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0], first);
    assert_eq!(stored[1], edited);
    assert_eq!(stored[2], last);
}

#[test]
fn edit_unknown_id_fails_without_touching_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let mut service = json_service(&dir);
    service.create("kept", "body").unwrap();
    let before = fs::read(&path).unwrap();

    let missing = Uuid::new_v4();
    let err = service.edit(missing, "x", "y").unwrap_err();
    match err {
        NoteServiceError::NoteNotFound(id) => assert_eq!(id, missing),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn edit_on_empty_store_does_not_create_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = json_service(&dir);

    assert!(service.edit(Uuid::new_v4(), "x", "y").is_err());
    assert!(!dir.path().join("notes.json").exists());
}

#[test]
fn delete_removes_exactly_the_target() {
    let mut service = NoteService::new(MemoryNoteRepository::new());
    let keep_a = service.create("a", "1").unwrap();
    let doomed = service.create("b", "2").unwrap();
    let keep_c = service.create("c", "3").unwrap();

    assert_eq!(service.delete(doomed.id).unwrap(), 1);

    let stored = service.repository().notes();
    assert_eq!(stored, &[keep_a, keep_c][..]);
    assert_eq!(service.find(doomed.id).unwrap(), None);
}

#[test]
fn delete_unknown_id_persists_unchanged_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let mut service = json_service(&dir);
    service.create("kept", "body").unwrap();
    let before = service.repository().load().unwrap();

    assert_eq!(service.delete(Uuid::new_v4()).unwrap(), 0);
    assert_eq!(service.repository().load().unwrap(), before);
    assert!(path.exists());
}

#[test]
fn delete_on_missing_store_writes_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let mut service = json_service(&dir);

    assert_eq!(service.delete(Uuid::new_v4()).unwrap(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn delete_removes_every_duplicate_id() {
    let stamp = ts("2024-01-01 00:00:00");
    let dup = Note::new("dup", "", stamp);
    let other = Note::new("other", "", stamp);
    let repo = MemoryNoteRepository::with_notes(vec![dup.clone(), other.clone(), dup.clone()]);
    let mut service = NoteService::new(repo);

    assert_eq!(service.delete(dup.id).unwrap(), 2);
    assert_eq!(service.repository().notes(), &[other][..]);
}

#[test]
fn malformed_store_fails_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    fs::write(&path, "not json").unwrap();
    let mut service = json_service(&dir);

    let is_malformed = |err: NoteServiceError| {
        matches!(err, NoteServiceError::Store(StoreError::Malformed { .. }))
    };
    assert!(is_malformed(service.create("t", "b").unwrap_err()));
    assert!(is_malformed(service.list_sorted().unwrap_err()));
    assert!(is_malformed(service.find(Uuid::new_v4()).unwrap_err()));
    assert!(is_malformed(service.edit(Uuid::new_v4(), "t", "b").unwrap_err()));
    assert!(is_malformed(service.delete(Uuid::new_v4()).unwrap_err()));
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
}

#[test]
fn groceries_and_todo_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = json_service(&dir);

    let groceries = service.create("Groceries", "milk,eggs").unwrap();
    assert_eq!(service.list_sorted().unwrap().len(), 1);

    let todo = service.create("Todo", "call bank").unwrap();
    let listed = service.list_sorted().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Todo");
    assert_eq!(listed[1].title, "Groceries");

    service
        .edit(todo.id, "Todo v2", "call bank, pay rent")
        .unwrap();
    let found = service.find(todo.id).unwrap().expect("todo should exist");
    assert_eq!(found.title, "Todo v2");
    assert_eq!(found.body, "call bank, pay rent");

    service.delete(groceries.id).unwrap();
    let remaining = service.list_sorted().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Todo v2");
}

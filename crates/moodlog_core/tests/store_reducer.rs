use chrono::NaiveDate;
use moodlog_core::{LogAction, LogEntry, LogStore, Mutation, StoreError, Tag};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn entry(date: &str, rating: u8, message: &str) -> LogEntry {
    LogEntry::new(day(date), rating, message, Vec::new())
}

#[test]
fn add_inserts_and_snapshot_returns_entry() {
    let mut store = LogStore::new();

    let applied = store
        .apply(LogAction::Add(entry("2024-03-01", 4, "ok")))
        .unwrap();
    assert_eq!(applied, Mutation::Inserted);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].date, day("2024-03-01"));
    assert_eq!(snapshot[0].rating, Some(4));
    assert_eq!(snapshot[0].message, "ok");
}

#[test]
fn edit_replaces_fields_wholesale_and_keeps_size() {
    let mut store = LogStore::new();
    store
        .apply(LogAction::Add(entry("2024-03-01", 4, "ok")))
        .unwrap();

    let tag = Tag::new("work");
    let replacement = LogEntry::new(day("2024-03-01"), 2, "better", vec![tag.clone()]);
    let applied = store.apply(LogAction::Edit(replacement)).unwrap();
    assert_eq!(applied, Mutation::Replaced);

    assert_eq!(store.len(), 1);
    let stored = store.get(day("2024-03-01")).unwrap();
    assert_eq!(stored.rating, Some(2));
    assert_eq!(stored.message, "better");
    assert_eq!(stored.tags, vec![tag]);
}

#[test]
fn edit_missing_key_is_rejected_without_state_change() {
    let mut store = LogStore::new();
    store
        .apply(LogAction::Add(entry("2024-03-01", 4, "ok")))
        .unwrap();
    let before = store.snapshot();

    let err = store
        .apply(LogAction::Edit(entry("2024-03-02", 1, "nope")))
        .unwrap_err();
    assert_eq!(err, StoreError::MissingEntry(day("2024-03-02")));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn delete_missing_key_is_a_noop() {
    let mut store = LogStore::new();
    store
        .apply(LogAction::Add(entry("2024-03-01", 4, "ok")))
        .unwrap();
    let before = store.snapshot();

    let applied = store
        .apply(LogAction::Delete(entry("2024-06-01", 3, "")))
        .unwrap();
    assert_eq!(applied, Mutation::Noop);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn delete_existing_key_removes_entry() {
    let mut store = LogStore::new();
    store
        .apply(LogAction::Add(entry("2024-03-01", 4, "ok")))
        .unwrap();

    let applied = store
        .apply(LogAction::Delete(entry("2024-03-01", 4, "ok")))
        .unwrap();
    assert_eq!(applied, Mutation::Removed);
    assert!(store.is_empty());
}

#[test]
fn duplicate_add_converges_to_latest_value() {
    let mut direct = LogStore::new();
    direct
        .apply(LogAction::Add(entry("2024-03-01", 4, "first")))
        .unwrap();
    let applied = direct
        .apply(LogAction::Add(entry("2024-03-01", 2, "second")))
        .unwrap();
    assert_eq!(applied, Mutation::Replaced);

    let mut via_edit = LogStore::new();
    via_edit
        .apply(LogAction::Add(entry("2024-03-01", 4, "first")))
        .unwrap();
    via_edit
        .apply(LogAction::Edit(entry("2024-03-01", 2, "second")))
        .unwrap();

    assert_eq!(direct.snapshot(), via_edit.snapshot());
    assert_eq!(direct.len(), 1);
}

#[test]
fn draft_entries_never_enter_the_store() {
    let mut store = LogStore::new();
    let draft = LogEntry::draft(day("2024-03-01"));

    let err = store.apply(LogAction::Add(draft.clone())).unwrap_err();
    assert_eq!(err, StoreError::DraftEntry(day("2024-03-01")));

    let err = store.apply(LogAction::Edit(draft)).unwrap_err();
    assert_eq!(err, StoreError::DraftEntry(day("2024-03-01")));
    assert!(store.is_empty());
}

#[test]
fn out_of_scale_rating_is_rejected() {
    let mut store = LogStore::new();
    let err = store
        .apply(LogAction::Add(entry("2024-03-01", 9, "")))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.is_empty());
}

#[test]
fn snapshot_is_date_ascending_regardless_of_insert_order() {
    let mut store = LogStore::new();
    for date in ["2024-05-10", "2024-01-02", "2024-03-15"] {
        store.apply(LogAction::Add(entry(date, 3, ""))).unwrap();
    }

    let dates: Vec<String> = store.snapshot().iter().map(|e| e.date_key()).collect();
    assert_eq!(dates, vec!["2024-01-02", "2024-03-15", "2024-05-10"]);
}

#[test]
fn snapshot_is_a_defensive_copy() {
    let mut store = LogStore::new();
    store
        .apply(LogAction::Add(entry("2024-03-01", 4, "ok")))
        .unwrap();

    let mut snapshot = store.snapshot();
    snapshot[0].message = "mutated".to_string();
    snapshot.clear();

    assert_eq!(store.get(day("2024-03-01")).unwrap().message, "ok");
    assert_eq!(store.len(), 1);
}

#[test]
fn size_follows_adds_minus_deletes_of_existing_keys() {
    let mut store = LogStore::new();
    store
        .apply(LogAction::Add(entry("2024-01-01", 3, "")))
        .unwrap();
    store
        .apply(LogAction::Add(entry("2024-01-02", 4, "")))
        .unwrap();
    store
        .apply(LogAction::Edit(entry("2024-01-01", 5, "edited")))
        .unwrap();
    store
        .apply(LogAction::Delete(entry("2024-01-02", 4, "")))
        .unwrap();
    store
        .apply(LogAction::Delete(entry("2024-01-02", 4, "")))
        .unwrap();

    // 2 adds, 1 delete of an existing key; the edit never changes size.
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(day("2024-01-01")).unwrap().rating, Some(5));
}

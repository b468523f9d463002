use notebox_core::db::open_db_in_memory;
use notebox_core::{NoteStore, SqliteNoteStore, StoreError};
use rusqlite::Connection;

/// Builds a store over a connection that was prepared with raw SQL first.
fn store_with(setup_sql: &str) -> SqliteNoteStore {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(setup_sql).unwrap();
    SqliteNoteStore::try_new(conn).unwrap()
}

#[test]
fn insert_assigns_increasing_ids_and_defaults_done_to_false() {
    let mut store = SqliteNoteStore::open_in_memory().unwrap();

    let first = store.insert("Buy milk", Some("")).unwrap();
    let second = store.insert("Walk the cat", None).unwrap();

    assert!(first > 0);
    assert!(second > first);
    let loaded = store.get(first).unwrap().unwrap();
    assert_eq!(loaded.title, "Buy milk");
    assert_eq!(loaded.details.as_deref(), Some(""));
    assert!(!loaded.done);
    assert_eq!(store.get(second).unwrap().unwrap().details, None);
}

#[test]
fn query_all_orders_by_done_then_id() {
    let mut store = SqliteNoteStore::open_in_memory().unwrap();
    let a = store.insert("a", None).unwrap();
    let b = store.insert("b", None).unwrap();
    let c = store.insert("c", None).unwrap();
    let d = store.insert("d", None).unwrap();
    assert!(store.toggle_done(a).unwrap());
    assert!(store.toggle_done(c).unwrap());

    let ids: Vec<_> = store.query_all().unwrap().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![b, d, a, c]);
}

#[test]
fn update_changes_title_and_details_but_not_done() {
    let mut store = SqliteNoteStore::open_in_memory().unwrap();
    let id = store.insert("draft", Some("old")).unwrap();
    store.toggle_done(id).unwrap();

    assert!(store.update(id, "final", None).unwrap());

    let loaded = store.get(id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.details, None);
    assert!(loaded.done);
}

#[test]
fn toggle_flips_between_zero_and_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    let mut store = SqliteNoteStore::open(&path).unwrap();
    let id = store.insert("task", None).unwrap();

    store.toggle_done(id).unwrap();
    assert!(store.get(id).unwrap().unwrap().done);
    store.toggle_done(id).unwrap();
    assert!(!store.get(id).unwrap().unwrap().done);
    drop(store);

    let raw: i64 = Connection::open(&path)
        .unwrap()
        .query_row("SELECT done FROM notes WHERE id = ?1;", [id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(raw, 0);
}

#[test]
fn mutations_on_unknown_id_are_noops() {
    let mut store = SqliteNoteStore::open_in_memory().unwrap();
    let id = store.insert("only", None).unwrap();
    let before = store.query_all().unwrap();

    assert!(!store.update(id + 100, "x", None).unwrap());
    assert!(!store.toggle_done(id + 100).unwrap());
    assert!(!store.delete(id + 100).unwrap());

    assert_eq!(store.query_all().unwrap(), before);
}

#[test]
fn deleted_ids_are_never_reused() {
    let mut store = SqliteNoteStore::open_in_memory().unwrap();
    let first = store.insert("one", None).unwrap();
    let second = store.insert("two", None).unwrap();

    assert!(store.delete(second).unwrap());
    assert_eq!(store.get(second).unwrap(), None);
    let third = store.insert("three", None).unwrap();

    assert!(third > second);
    assert_eq!(store.count().unwrap(), 2);
    assert!(store.get(first).unwrap().is_some());
}

#[test]
fn failed_mutation_rolls_back_and_leaves_rows_untouched() {
    let mut store = store_with(
        "CREATE TRIGGER reject_title BEFORE UPDATE OF title ON notes
         WHEN NEW.title = 'forbidden'
         BEGIN SELECT RAISE(ABORT, 'title rejected'); END;",
    );
    let id = store.insert("keep", None).unwrap();

    let err = store.update(id, "forbidden", None).unwrap_err();
    assert!(matches!(err, StoreError::Db(_)));

    assert_eq!(store.get(id).unwrap().unwrap().title, "keep");
    // A dangling transaction would make the next write fail to begin.
    assert!(store.update(id, "allowed", None).unwrap());
    assert_eq!(store.get(id).unwrap().unwrap().title, "allowed");
}

#[test]
fn invalid_done_value_is_reported_not_masked() {
    let store = store_with(
        "INSERT INTO notes (done, title, details) VALUES (7, 'corrupt', NULL);",
    );

    let err = store.query_all().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn null_title_from_older_rows_reads_as_empty() {
    let store = store_with("INSERT INTO notes (done, title, details) VALUES (0, NULL, NULL);");

    let notes = store.query_all().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "");
}

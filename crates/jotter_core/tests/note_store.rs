use jotter_core::{
    KeyValueStore, MemoryKeyValueStore, Note, NotePersistence, NoteStore, StorageError,
    StorageResult, StoreError,
};
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use uuid::Uuid;

fn memory_store() -> NoteStore<MemoryKeyValueStore> {
    NoteStore::open(NotePersistence::new(MemoryKeyValueStore::new()))
}

/// Memory store whose writes can be switched off from the test.
struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_writes: Rc<Cell<bool>>,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable("disk full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.inner.remove(key)
    }
}

#[test]
fn create_then_find_returns_exact_fields() {
    let mut store = memory_store();
    let created = store.create("Groceries", "  milk\neggs ").unwrap();

    let found = store.find_by_id(created.id).unwrap();
    assert_eq!(found.title, "Groceries");
    assert_eq!(found.content, "  milk\neggs ");
    assert_eq!(found, &created);
}

#[test]
fn create_appends_and_persists() {
    let mut store = memory_store();
    let a = store.create("A", "x").unwrap();
    let b = store.create("B", "y").unwrap();

    assert_eq!(store.notes(), &[a.clone(), b.clone()]);
    assert_eq!(store.persistence().load(), vec![a, b]);
}

#[test]
fn rapid_creation_yields_unique_ids() {
    let mut store = memory_store();
    for idx in 0..200 {
        store.create(format!("note {idx}"), "body").unwrap();
    }
    let ids: HashSet<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn update_changes_only_title_and_content() {
    let mut store = memory_store();
    let a = store.create("A", "x").unwrap();
    let b = store.create("B", "y").unwrap();
    let c = store.create("C", "z").unwrap();

    let updated = store.update(b.id, "B2", "y2").unwrap();
    assert_eq!(updated, Note::with_id(b.id, "B2", "y2"));

    let ids: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
    assert_eq!(store.notes()[0], a);
    assert_eq!(store.notes()[2], c);
    assert_eq!(store.persistence().load(), store.notes());
}

#[test]
fn update_missing_id_signals_not_found_and_keeps_collection() {
    let mut store = memory_store();
    let a = store.create("A", "x").unwrap();
    let missing = Uuid::new_v4();

    let err = store.update(missing, "B", "y").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    assert_eq!(store.notes(), &[a]);
}

#[test]
fn delete_removes_exactly_one_note() {
    let mut store = memory_store();
    let a = store.create("A", "x").unwrap();
    let b = store.create("B", "y").unwrap();

    let removed = store.delete(a.id).unwrap();
    assert_eq!(removed, a);
    assert_eq!(store.len(), 1);
    assert!(store.find_by_id(a.id).is_none());
    assert_eq!(store.persistence().load(), vec![b]);
}

#[test]
fn delete_missing_id_signals_not_found_and_keeps_collection() {
    let mut store = memory_store();
    store.create("A", "x").unwrap();

    let err = store.delete(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.len(), 1);
}

#[test]
fn store_reloads_collection_from_storage() {
    let mut first = memory_store();
    first.create("A", "x").unwrap();
    first.create("B", "y").unwrap();
    let snapshot = first.persistence().store().clone();

    let reopened = NoteStore::open(NotePersistence::new(snapshot));
    let titles: Vec<_> = reopened.notes().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
}

#[test]
fn failed_write_rolls_back_every_mutation() {
    let fail_writes = Rc::new(Cell::new(false));
    let flaky = FlakyStore {
        inner: MemoryKeyValueStore::new(),
        fail_writes: Rc::clone(&fail_writes),
    };
    let mut store = NoteStore::open(NotePersistence::new(flaky));
    let a = store.create("A", "x").unwrap();
    let b = store.create("B", "y").unwrap();

    fail_writes.set(true);
    assert!(matches!(
        store.create("C", "z").unwrap_err(),
        StoreError::Storage(_)
    ));
    assert!(matches!(
        store.update(a.id, "A2", "x2").unwrap_err(),
        StoreError::Storage(_)
    ));
    assert!(matches!(
        store.delete(b.id).unwrap_err(),
        StoreError::Storage(_)
    ));

    assert_eq!(store.notes(), &[a.clone(), b.clone()]);
    assert_eq!(store.persistence().load(), vec![a, b]);
}

use proto_persistence::{InMemoryStore, JsonFileStore, KeyValueStore, BUCKET_MOLECULES};
use serde_json::json;

#[test]
fn in_memory_roundtrip() {
    let mut store = InMemoryStore::new();
    store.put(BUCKET_MOLECULES, "fp1", &json!({"formula": "H2O"})).unwrap();
    let got = store.get(BUCKET_MOLECULES, "fp1").unwrap().unwrap();
    assert_eq!(got["formula"], "H2O");

    // listing returns every record of the bucket
    store.put(BUCKET_MOLECULES, "fp2", &json!({"formula": "C2H4"})).unwrap();
    assert_eq!(store.list(BUCKET_MOLECULES).unwrap().len(), 2);

    // deleting an unknown key is not an error
    store.delete(BUCKET_MOLECULES, "missing").unwrap();
    store.delete(BUCKET_MOLECULES, "fp1").unwrap();
    assert!(store.get(BUCKET_MOLECULES, "fp1").unwrap().is_none());
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = JsonFileStore::new(dir.path()).unwrap();
        store.put(BUCKET_MOLECULES, "fp1", &json!({"formula": "H2O"})).unwrap();
    }
    // a fresh store over the same directory sees the persisted record
    let store = JsonFileStore::new(dir.path()).unwrap();
    let got = store.get(BUCKET_MOLECULES, "fp1").unwrap().unwrap();
    assert_eq!(got["formula"], "H2O");
}

#[test]
fn file_store_empty_bucket_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path()).unwrap();
    assert!(store.list("organisms").unwrap().is_empty());
}

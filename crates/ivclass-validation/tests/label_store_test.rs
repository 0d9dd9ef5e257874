//! LabelStore behavior: validated case-insensitive labels, persistence
//! round-trips, lenient load, and the memcapacitive opt-in.

use ivclass_core::class::DeviceClass;
use ivclass_validation::LabelStore;

fn store_in(dir: &tempfile::TempDir) -> LabelStore {
    LabelStore::new(dir.path().join("labels.json"))
}

#[test]
fn set_label_normalizes_case() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.set_label("dev1", "Memristive").unwrap();
    assert_eq!(store.get_label("dev1"), Some(DeviceClass::Memristive));
    assert!(store.has_label("dev1"));
    assert_eq!(store.get_labeled_count(), 1);
}

#[test]
fn set_label_rejects_invalid_class_and_leaves_state_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.set_label("dev1", "ohmic").unwrap();
    assert!(store.set_label("dev1", "banana").is_err());
    assert_eq!(store.get_label("dev1"), Some(DeviceClass::Ohmic));
    assert_eq!(store.get_labeled_count(), 1);
}

#[test]
fn memcapacitive_requires_opt_in() {
    let dir = tempfile::tempdir().unwrap();
    let mut strict = store_in(&dir);
    assert!(strict.set_label("dev1", "memcapacitive").is_err());

    let mut permissive =
        LabelStore::new(dir.path().join("labels2.json")).with_memcapacitive_labels(true);
    permissive.set_label("dev1", "memcapacitive").unwrap();
    assert_eq!(
        permissive.get_label("dev1"),
        Some(DeviceClass::Memcapacitive)
    );
}

#[test]
fn remove_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.set_label("dev1", "capacitive").unwrap();
    store.set_label("dev2", "conductive").unwrap();

    assert!(store.remove_label("dev1").unwrap());
    assert!(!store.remove_label("dev1").unwrap());
    assert_eq!(store.get_labeled_count(), 1);

    store.clear().unwrap();
    assert_eq!(store.get_labeled_count(), 0);
}

#[test]
fn save_then_load_round_trips_every_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.json");

    let mut store = LabelStore::new(&path);
    store.set_label("dev1", "memristive").unwrap();
    store.set_label("dev2", "OHMIC").unwrap();

    let mut reloaded = LabelStore::new(&path);
    reloaded.load();
    assert_eq!(reloaded.get_all_labels(), store.get_all_labels());
}

#[test]
fn load_with_missing_or_corrupt_file_yields_empty_table() {
    let dir = tempfile::tempdir().unwrap();

    let mut missing = LabelStore::new(dir.path().join("absent.json"));
    missing.load();
    assert_eq!(missing.get_labeled_count(), 0);

    let path = dir.path().join("corrupt.json");
    std::fs::write(&path, "[[[").unwrap();
    let mut corrupt = LabelStore::new(&path);
    corrupt.load();
    assert_eq!(corrupt.get_labeled_count(), 0);
}

#[test]
fn load_skips_entries_with_invalid_classes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.json");
    std::fs::write(
        &path,
        r#"{"dev1": "memristive", "dev2": "banana", "dev3": "memcapacitive"}"#,
    )
    .unwrap();

    let mut store = LabelStore::new(&path);
    store.load();
    assert_eq!(store.get_labeled_count(), 1);
    assert_eq!(store.get_label("dev1"), Some(DeviceClass::Memristive));
}

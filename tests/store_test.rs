mod common;

use voxplay::management::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

use common::fresh_credential;

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("token_info.json"));

    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_file_store_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("cache").join("token_info.json"));
    let credential = fresh_credential();

    store.save(&credential).await.unwrap();

    assert!(store.path().exists());
    assert_eq!(store.load().await.unwrap(), Some(credential));
}

#[tokio::test]
async fn test_file_store_save_replaces_previous_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("token_info.json"));

    store.save(&common::credential("first", 3600)).await.unwrap();
    store.save(&common::credential("second", 3600)).await.unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded.access_token, "second");
}

#[tokio::test]
async fn test_file_store_corrupt_record_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token_info.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = FileCredentialStore::new(path.clone());

    assert_eq!(store.load().await.unwrap(), None);
    assert!(!path.exists());
    // A second load sees a plain missing file.
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_file_store_non_utf8_record_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token_info.json");
    std::fs::write(&path, [0xff, 0xfe, 0x7b, 0x00]).unwrap();
    let store = FileCredentialStore::new(path.clone());

    assert_eq!(store.load().await.unwrap(), None);
    assert!(!path.exists());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_file_store_record_with_missing_fields_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token_info.json");
    std::fs::write(&path, r#"{"access_token":"abc"}"#).unwrap();
    let store = FileCredentialStore::new(path.clone());

    assert_eq!(store.load().await.unwrap(), None);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_memory_store_counts_saves() {
    let store = MemoryCredentialStore::default();
    assert_eq!(store.load().await.unwrap(), None);

    let credential = fresh_credential();
    store.save(&credential).await.unwrap();

    assert_eq!(store.save_count().await, 1);
    assert_eq!(store.current().await, Some(credential));
}

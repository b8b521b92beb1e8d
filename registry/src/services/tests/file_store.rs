//! Tests for the JsonFileTuitionStore service

use shared::TuitionStatus;
use tempfile::TempDir;
use tokio::fs;

use super::fixtures::*;
use crate::error::StoreError;
use crate::services::JsonFileTuitionStore;
use crate::traits::TuitionStore;

async fn open_in(dir: &TempDir) -> JsonFileTuitionStore {
    JsonFileTuitionStore::open(dir.path().join("data").join("tuitions.json"))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_file_store_contract() {
    let dir = TempDir::new().unwrap();
    let store = open_in(&dir).await;
    assert_store_contract(&store).await;
}

#[tokio::test]
async fn test_reopen_restores_tuitions() {
    let dir = TempDir::new().unwrap();
    let tuition = create_test_tuition(115);

    {
        let store = open_in(&dir).await;
        store.insert(tuition.clone()).await.unwrap();
        store.insert(create_test_tuition(116)).await.unwrap();
        store.delete_by_code(&create_test_tuition(116).code).await.unwrap();
    }

    let reopened = open_in(&dir).await;
    assert_eq!(reopened.count().await.unwrap(), 1);
    assert_eq!(reopened.find_by_code(&tuition.code).await.unwrap(), Some(tuition.clone()));

    let err = reopened.insert(create_test_tuition(115)).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateCode { .. }));
}

#[tokio::test]
async fn test_status_update_is_persisted() {
    let dir = TempDir::new().unwrap();
    let tuition = create_test_tuition(120);

    {
        let store = open_in(&dir).await;
        store.insert(tuition.clone()).await.unwrap();
        store
            .update_status(&tuition.code, TuitionStatus::Assigned)
            .await
            .unwrap();
    }

    let reopened = open_in(&dir).await;
    let found = reopened.find_by_code(&tuition.code).await.unwrap().unwrap();
    assert_eq!(found.status, TuitionStatus::Assigned);
}

#[tokio::test]
async fn test_no_temp_file_left_behind() {
    let dir = TempDir::new().unwrap();
    let store = open_in(&dir).await;
    store.insert(create_test_tuition(110)).await.unwrap();

    let data_dir = dir.path().join("data");
    let mut entries = fs::read_dir(&data_dir).await.unwrap();
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    assert_eq!(names, vec!["tuitions.json".to_string()]);
}

#[tokio::test]
async fn test_failed_persist_rolls_back_and_removes_temp_file() {
    let dir = TempDir::new().unwrap();
    let store = open_in(&dir).await;

    // A non-empty directory at the data path makes the final rename fail
    let blocker = dir.path().join("data").join("tuitions.json");
    fs::create_dir_all(blocker.join("occupied")).await.unwrap();

    let result = store.insert(create_test_tuition(110)).await;
    assert!(matches!(result, Err(StoreError::IoError(_))));
    assert_eq!(store.count().await.unwrap(), 0);

    let mut entries = fs::read_dir(dir.path().join("data")).await.unwrap();
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    assert_eq!(names, vec!["tuitions.json".to_string()]);
}

#[tokio::test]
async fn test_empty_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tuitions.json");
    fs::write(&path, "").await.unwrap();

    let store = JsonFileTuitionStore::open(&path).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_corrupt_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tuitions.json");
    fs::write(&path, "{not json").await.unwrap();

    let result = JsonFileTuitionStore::open(&path).await;
    assert!(matches!(result, Err(StoreError::JsonError(_))));
}

#[tokio::test]
async fn test_duplicate_codes_on_disk_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tuitions.json");
    let records = vec![create_test_tuition(110), create_test_tuition(110)];
    fs::write(&path, serde_json::to_vec(&records).unwrap()).await.unwrap();

    let result = JsonFileTuitionStore::open(&path).await;
    assert!(matches!(result, Err(StoreError::DuplicateCode { .. })));
}

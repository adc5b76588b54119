//! Concurrency tests for Cumulus.
//!
//! These tests verify the file store's behavior under racing operations,
//! in particular that duplicate uploads of the same name resolve to
//! exactly one winner.

use std::sync::Arc;

use tempfile::TempDir;

use cumulus::db::{NewUser, UserRepository};
use cumulus::file::{BlobStore, FileStore};
use cumulus::{CumulusError, Database};

async fn setup() -> (TempDir, Arc<FileStore>, i64) {
    let db = Database::open_in_memory().await.unwrap();
    let temp_dir = TempDir::new().unwrap();
    let blobs = BlobStore::new(temp_dir.path()).unwrap();

    let user = UserRepository::new(db.pool())
        .create(&NewUser::new("owner", "hash"))
        .await
        .unwrap();

    (temp_dir, Arc::new(FileStore::new(db, blobs)), user.id)
}

#[tokio::test]
async fn test_concurrent_duplicate_uploads_one_winner() {
    let (_tmp, store, owner) = setup().await;

    const NUM_UPLOADS: usize = 8;

    let mut handles = Vec::new();
    for i in 0..NUM_UPLOADS {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let payload = format!("payload-{i}");
            store.upload(owner, "contested.txt", payload.as_bytes()).await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(CumulusError::Conflict(_)) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, NUM_UPLOADS - 1);

    // Exactly one record remains and its blob matches its recorded size
    let records = store.list(owner, None).await.unwrap();
    assert_eq!(records.len(), 1);
    let content = store.download(owner, "contested.txt").await.unwrap();
    assert_eq!(content.len() as i64, records[0].size);
}

#[tokio::test]
async fn test_concurrent_distinct_uploads_all_succeed() {
    let (_tmp, store, owner) = setup().await;

    const NUM_UPLOADS: usize = 10;

    let mut handles = Vec::new();
    for i in 0..NUM_UPLOADS {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let filename = format!("file-{i}.txt");
            store.upload(owner, &filename, b"data").await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let records = store.list(owner, None).await.unwrap();
    assert_eq!(records.len(), NUM_UPLOADS);
}

#[tokio::test]
async fn test_concurrent_delete_one_winner() {
    let (_tmp, store, owner) = setup().await;

    store.upload(owner, "a.txt", b"data").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(
            async move { store.delete(owner, "a.txt").await },
        ));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(CumulusError::NotFound(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert!(store.list(owner, None).await.unwrap().is_empty());
}

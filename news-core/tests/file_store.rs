use std::sync::Arc;

use news_core::{
    ErrorKind, FileStorage, NewsDraft, NewsPatch, NewsService, NewsState, StoragePort,
    StoredNewsRepository,
};

fn service_at(dir: &std::path::Path) -> NewsService<StoredNewsRepository<FileStorage>> {
    NewsService::new(Arc::new(StoredNewsRepository::new(FileStorage::new(dir))))
}

#[tokio::test]
async fn collection_survives_reopening_the_directory() {
    let dir = tempfile::tempdir().unwrap();

    let first = service_at(dir.path());
    let a = first
        .create(NewsDraft::new("First", "body", "http://i/1.png"))
        .await
        .data
        .unwrap();
    let b = first
        .create(NewsDraft::new("Second", "body", "http://i/2.png"))
        .await
        .data
        .unwrap();
    first
        .update(
            &a.id,
            NewsPatch {
                content: Some("changed".into()),
                ..NewsPatch::default()
            },
        )
        .await
        .data
        .unwrap();

    let reopened = service_at(dir.path());
    let items = reopened.list().await.data.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, a.id);
    assert_eq!(items[0].content, "changed");
    assert_eq!(items[1], b);

    assert!(reopened.delete(&a.id).await.success);
    assert_eq!(service_at(dir.path()).list().await.data.unwrap(), vec![b]);
}

#[tokio::test]
async fn empty_directory_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let news = service_at(&dir.path().join("not-created-yet"));
    assert_eq!(news.list().await.data, Some(Vec::new()));
}

#[tokio::test]
async fn corrupt_file_fails_fetch_without_being_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage.write("news_items", "not json").await.unwrap();

    let state = NewsState::new(service_at(dir.path()));
    assert!(!state.fetch_all().await);
    assert!(!state.create(NewsDraft::new("Abc", "x", "u")).await);

    let response = state.service().list().await;
    assert!(response.is_kind(ErrorKind::Storage));
    assert_eq!(
        storage.read("news_items").await.unwrap().as_deref(),
        Some("not json")
    );
}

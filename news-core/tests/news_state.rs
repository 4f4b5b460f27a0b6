use std::sync::{Arc, Mutex};
use std::time::Duration;

use news_core::{
    MemoryStorage, NewsDraft, NewsPatch, NewsService, NewsState, Notification,
    NotificationLevel, Notifier, StoredNewsRepository,
};

#[derive(Default)]
struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

type Repo = StoredNewsRepository<MemoryStorage>;

fn state_with(repo: Repo) -> (NewsState<Repo>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = NewsState::with_notifier(NewsService::new(Arc::new(repo)), notifier.clone());
    (state, notifier)
}

fn state() -> (NewsState<Repo>, Arc<RecordingNotifier>) {
    state_with(StoredNewsRepository::new(MemoryStorage::new()))
}

fn draft(title: &str) -> NewsDraft {
    NewsDraft::new(title, "body", "http://i/1.png")
}

#[tokio::test]
async fn create_appends_and_notifies() {
    let (state, notifier) = state();

    assert!(state.create(draft("First")).await);
    assert!(state.create(draft("Second")).await);

    let titles: Vec<_> = state.news().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, ["First", "Second"]);
    assert!(!state.is_loading());
    assert_eq!(state.error(), None);
    assert_eq!(
        notifier.take(),
        vec![
            Notification::success("News created successfully"),
            Notification::success("News created successfully"),
        ]
    );
}

#[tokio::test]
async fn failed_create_records_error_and_resets_loading() {
    let (state, notifier) = state();

    assert!(!state.create(draft("Ab")).await);

    let snapshot = state.snapshot();
    assert!(snapshot.news.is_empty());
    assert!(!snapshot.is_loading);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Title must be at least 3 characters long")
    );

    let seen = notifier.take();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, NotificationLevel::Failure);
}

#[tokio::test]
async fn next_action_clears_previous_error() {
    let (state, _) = state();
    assert!(!state.delete("missing").await);
    assert!(state.error().is_some());

    assert!(state.fetch_all().await);
    assert_eq!(state.error(), None);
}

#[tokio::test]
async fn fetch_all_replaces_the_list() {
    let (writer, _) = state();
    writer.create(draft("Stored")).await;

    // A second container over the same service starts empty.
    let reader = NewsState::new(writer.service().clone());
    assert!(reader.news().is_empty());

    assert!(reader.fetch_all().await);
    let titles: Vec<_> = reader.news().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, ["Stored"]);
}

#[tokio::test]
async fn failed_fetch_records_error_and_keeps_the_list() {
    let (state, notifier) = state_with(StoredNewsRepository::new(MemoryStorage::with_entry(
        "news_items",
        "[{broken",
    )));

    assert!(!state.fetch_all().await);

    let snapshot = state.snapshot();
    assert!(snapshot.news.is_empty());
    assert!(!snapshot.is_loading);
    assert!(snapshot.error.as_deref().unwrap().contains("corrupt"));

    let seen = notifier.take();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, NotificationLevel::Failure);
}

#[tokio::test]
async fn update_replaces_in_place_and_refreshes_selection() {
    let (state, notifier) = state();
    state.create(draft("First")).await;
    state.create(draft("Second")).await;
    state.create(draft("Third")).await;
    notifier.take();

    let target = state.news()[1].clone();
    state.select(target.clone());

    let ok = state
        .update(
            &target.id,
            NewsPatch {
                title: Some("Second, revised".into()),
                ..NewsPatch::default()
            },
        )
        .await;
    assert!(ok);

    let titles: Vec<_> = state.news().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, ["First", "Second, revised", "Third"]);
    assert_eq!(state.selected().unwrap().title, "Second, revised");
    assert_eq!(
        notifier.take(),
        vec![Notification::success("News updated successfully")]
    );
}

#[tokio::test]
async fn delete_removes_record_and_selection() {
    let (state, _) = state();
    state.create(draft("First")).await;
    state.create(draft("Second")).await;

    let doomed = state.news()[0].clone();
    state.select(doomed.clone());

    assert!(state.delete(&doomed.id).await);
    let titles: Vec<_> = state.news().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, ["Second"]);
    assert_eq!(state.selected(), None);
}

#[tokio::test]
async fn failed_delete_keeps_the_list() {
    let (state, notifier) = state();
    state.create(draft("First")).await;
    notifier.take();

    assert!(!state.delete("missing").await);
    assert_eq!(state.news().len(), 1);
    assert_eq!(
        notifier.take(),
        vec![Notification::failure("News item not found: missing")]
    );
}

#[tokio::test]
async fn get_by_id_returns_envelope_without_touching_list() {
    let (state, _) = state();
    state.create(draft("First")).await;
    let id = state.news()[0].id.clone();

    let found = state.get_by_id(&id).await;
    assert!(found.success);
    assert_eq!(found.data.unwrap().id, id);

    let missing = state.get_by_id("missing").await;
    assert!(!missing.success);
    assert_eq!(state.error(), missing.error);
    assert_eq!(state.news().len(), 1);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn selection_and_error_can_be_cleared() {
    let (state, _) = state();
    state.create(draft("First")).await;
    state.select(state.news()[0].clone());
    state.delete("missing").await;

    state.clear_selection();
    state.clear_error();

    let snapshot = state.snapshot();
    assert_eq!(snapshot.selected, None);
    assert_eq!(snapshot.error, None);
}

#[tokio::test]
async fn loading_is_published_while_an_action_runs() {
    let repo = StoredNewsRepository::new(MemoryStorage::new()).with_latency(Duration::from_millis(50));
    let (state, _) = state_with(repo);
    let state = Arc::new(state);
    let mut updates = state.subscribe();

    let task = {
        let state = Arc::clone(&state);
        tokio::spawn(async move { state.fetch_all().await })
    };

    updates
        .wait_for(|s| s.is_loading)
        .await
        .expect("state dropped");
    assert!(task.await.unwrap());
    assert!(!state.is_loading());
}

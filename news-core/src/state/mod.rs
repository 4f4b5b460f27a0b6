//! In-memory view of the news collection for presentation code.

pub mod notifier;

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::news_service::NewsService;
use crate::data::news_repository::NewsRepository;
use crate::domain::envelope::Envelope;
use crate::domain::news::{NewsDraft, NewsItem, NewsPatch};
use crate::state::notifier::{Notification, Notifier, TracingNotifier};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsSnapshot {
    pub news: Vec<NewsItem>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub selected: Option<NewsItem>,
}

/// Holds the list, loading flag, last error and selection, and keeps them in
/// step with the service after every action.
///
/// Every change is published on a watch channel. Overlapping actions are
/// not coordinated: whichever settles last decides the shared fields.
pub struct NewsState<R: NewsRepository + 'static> {
    service: NewsService<R>,
    notifier: Arc<dyn Notifier>,
    snapshot: watch::Sender<NewsSnapshot>,
}

impl<R> NewsState<R>
where
    R: NewsRepository + 'static,
{
    pub fn new(service: NewsService<R>) -> Self {
        Self::with_notifier(service, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(service: NewsService<R>, notifier: Arc<dyn Notifier>) -> Self {
        let (snapshot, _) = watch::channel(NewsSnapshot::default());
        Self {
            service,
            notifier,
            snapshot,
        }
    }

    pub fn service(&self) -> &NewsService<R> {
        &self.service
    }

    pub fn snapshot(&self) -> NewsSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NewsSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn news(&self) -> Vec<NewsItem> {
        self.snapshot.borrow().news.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.snapshot.borrow().error.clone()
    }

    pub fn selected(&self) -> Option<NewsItem> {
        self.snapshot.borrow().selected.clone()
    }

    /// Replaces the list with the stored collection.
    pub async fn fetch_all(&self) -> bool {
        self.begin();
        match self.service.list().await.into_result() {
            Ok(news) => {
                self.settle(|s| s.news = news);
                true
            }
            Err(error) => {
                self.fail(error, "Failed to fetch news");
                false
            }
        }
    }

    /// Appends the created record to the end of the list.
    pub async fn create(&self, draft: NewsDraft) -> bool {
        self.begin();
        match self.service.create(draft).await.into_result() {
            Ok(item) => {
                self.settle(|s| s.news.push(item));
                self.notifier
                    .notify(Notification::success("News created successfully"));
                true
            }
            Err(error) => {
                self.fail(error, "Failed to create news");
                false
            }
        }
    }

    /// Swaps the updated record in place, keeping its position.
    pub async fn update(&self, id: &str, patch: NewsPatch) -> bool {
        self.begin();
        match self.service.update(id, patch).await.into_result() {
            Ok(item) => {
                self.settle(|s| {
                    if let Some(slot) = s.news.iter_mut().find(|n| n.id == id) {
                        *slot = item.clone();
                    }
                    if s.selected.as_ref().is_some_and(|n| n.id == id) {
                        s.selected = Some(item);
                    }
                });
                self.notifier
                    .notify(Notification::success("News updated successfully"));
                true
            }
            Err(error) => {
                self.fail(error, "Failed to update news");
                false
            }
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        self.begin();
        match self.service.delete(id).await.into_result() {
            Ok(()) => {
                self.settle(|s| {
                    s.news.retain(|n| n.id != id);
                    if s.selected.as_ref().is_some_and(|n| n.id == id) {
                        s.selected = None;
                    }
                });
                self.notifier
                    .notify(Notification::success("News deleted successfully"));
                true
            }
            Err(error) => {
                self.fail(error, "Failed to delete news");
                false
            }
        }
    }

    /// Looks up one record without touching the list. The envelope is
    /// returned so callers can branch on the outcome.
    pub async fn get_by_id(&self, id: &str) -> Envelope<NewsItem> {
        self.begin();
        let response = self.service.get_by_id(id).await;
        if response.success {
            self.settle(|_| {});
        } else {
            self.fail(response.error.clone(), "Failed to fetch news");
        }
        response
    }

    pub fn select(&self, item: NewsItem) {
        self.snapshot.send_modify(|s| s.selected = Some(item));
    }

    pub fn clear_selection(&self) {
        self.snapshot.send_modify(|s| s.selected = None);
    }

    pub fn clear_error(&self) {
        self.snapshot.send_modify(|s| s.error = None);
    }

    fn begin(&self) {
        self.snapshot.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
    }

    fn settle(&self, reconcile: impl FnOnce(&mut NewsSnapshot)) {
        self.snapshot.send_modify(|s| {
            reconcile(s);
            s.is_loading = false;
        });
    }

    fn fail(&self, error: Option<String>, fallback: &str) {
        let message = error.unwrap_or_else(|| fallback.to_string());
        self.snapshot.send_modify(|s| {
            s.error = Some(message.clone());
            s.is_loading = false;
        });
        self.notifier.notify(Notification::failure(message));
    }
}

use std::sync::Arc;

use chrono::Utc;
use tracing::{instrument, warn};

use crate::application::validation::{validate, validate_patch};
use crate::data::news_repository::NewsRepository;
use crate::domain::envelope::Envelope;
use crate::domain::error::DomainError;
use crate::domain::news::{NewsDraft, NewsItem, NewsPatch};

/// CRUD entry points. Every method answers with an [`Envelope`]; no error
/// escapes this layer.
pub struct NewsService<R: NewsRepository + 'static> {
    repo: Arc<R>,
}

impl<R: NewsRepository + 'static> Clone for NewsService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> NewsService<R>
where
    R: NewsRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Envelope<Vec<NewsItem>> {
        respond("list", self.repo.list().await)
    }

    pub async fn get_by_id(&self, id: &str) -> Envelope<NewsItem> {
        respond("get_by_id", self.repo.get(id).await)
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: NewsDraft) -> Envelope<NewsItem> {
        respond("create", self.try_create(draft).await)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: NewsPatch) -> Envelope<NewsItem> {
        respond("update", self.try_update(id, patch).await)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Envelope<()> {
        respond("delete", self.repo.remove(id).await)
    }

    async fn try_create(&self, draft: NewsDraft) -> Result<NewsItem, DomainError> {
        let report = validate(&draft);
        if !report.is_valid() {
            return Err(DomainError::Validation(report));
        }
        self.repo.insert(NewsItem::new(draft)).await
    }

    async fn try_update(&self, id: &str, patch: NewsPatch) -> Result<NewsItem, DomainError> {
        let report = validate_patch(&patch);
        if !report.is_valid() {
            return Err(DomainError::Validation(report));
        }

        let mut item = self.repo.get(id).await?;
        item.apply(patch, Utc::now());
        self.repo.replace(id, item).await
    }
}

fn respond<T>(operation: &'static str, result: Result<T, DomainError>) -> Envelope<T> {
    if let Err(err) = &result {
        warn!(operation, kind = ?err.kind(), "news operation failed: {}", err);
    }
    result.into()
}

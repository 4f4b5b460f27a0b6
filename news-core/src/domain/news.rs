use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted news record. Field names follow the stored JSON layout.
///
/// Records written by older front ends may lack `updatedAt` or carry a bare
/// date as `publicationDate`; both default from `createdAt` on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase", try_from = "StoredNewsItem")]
#[display("NewsItem {{ id: {}, title: {} }}", id, title)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub publication_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewsItem {
    pub fn new(draft: NewsDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            image_url: draft.image_url,
            publication_date: draft.publication_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the fields carried by `patch`. `id` and `created_at` are left
    /// alone and `updated_at` never moves backwards.
    pub fn apply(&mut self, patch: NewsPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(publication_date) = patch.publication_date {
            self.publication_date = publication_date;
        }
        self.updated_at = now.max(self.updated_at);
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNewsItem {
    id: String,
    title: String,
    content: String,
    image_url: String,
    #[serde(default)]
    publication_date: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<StoredNewsItem> for NewsItem {
    type Error = String;

    fn try_from(stored: StoredNewsItem) -> Result<Self, Self::Error> {
        let publication_date = match stored.publication_date.as_deref().map(str::trim) {
            None | Some("") => stored.created_at,
            Some(raw) => parse_timestamp(raw)
                .ok_or_else(|| format!("invalid publicationDate `{raw}` for news item {}", stored.id))?,
        };

        Ok(Self {
            publication_date,
            updated_at: stored.updated_at.unwrap_or(stored.created_at),
            id: stored.id,
            title: stored.title,
            content: stored.content,
            image_url: stored.image_url,
            created_at: stored.created_at,
        })
    }
}

/// Accepts RFC 3339 timestamps as well as the `datetime-local` and `date`
/// input formats, the latter two read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Input for creating a record. Missing fields deserialize as empty strings
/// so that validation reports them instead of the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<DateTime<Utc>>,
}

impl NewsDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url: image_url.into(),
            publication_date: None,
        }
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<DateTime<Utc>>,
}

impl NewsPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.image_url.is_none()
            && self.publication_date.is_none()
    }
}

//! News feed management: a validated CRUD service over a single serialized
//! collection, plus a state container for presentation code.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod state;

pub use application::news_service::NewsService;
pub use application::validation::{validate, validate_patch};
#[cfg(feature = "web")]
pub use data::storage::BrowserStorage;
pub use data::news_repository::{DEFAULT_STORAGE_KEY, NewsRepository, StoredNewsRepository};
#[cfg(not(target_family = "wasm"))]
pub use data::storage::FileStorage;
pub use data::storage::{MemoryStorage, StoragePort};
pub use domain::envelope::Envelope;
pub use domain::error::{DomainError, ErrorKind, FieldError, ValidationReport};
pub use domain::news::{NewsDraft, NewsItem, NewsPatch};
pub use infrastructure::config::AppConfig;
pub use infrastructure::logging::init_logging;
pub use state::notifier::{Notification, NotificationLevel, Notifier, TracingNotifier};
pub use state::{NewsSnapshot, NewsState};

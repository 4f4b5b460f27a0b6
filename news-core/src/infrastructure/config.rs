use std::path::PathBuf;
use std::time::Duration;

use crate::data::news_repository::DEFAULT_STORAGE_KEY;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub latency: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".news"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            latency: Duration::ZERO,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let data_dir = std::env::var("NEWS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let storage_key = std::env::var("NEWS_STORAGE_KEY")
            .map(|s| s.trim().to_string())
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.storage_key);
        let latency = match std::env::var("NEWS_LATENCY_MS") {
            Ok(raw) => parse_latency(&raw)?,
            Err(_) => defaults.latency,
        };

        Ok(Self {
            data_dir,
            storage_key,
            latency,
        })
    }
}

fn parse_latency(raw: &str) -> anyhow::Result<Duration> {
    let millis: u64 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid NEWS_LATENCY_MS: {}", e))?;
    Ok(Duration::from_millis(millis))
}

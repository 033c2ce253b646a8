use anyhow::{Context, Result};
use importer::FeedSources;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// When unset the API runs on a process-local store.
    pub database_url: Option<String>,
    pub feeds: FeedSources,
    pub feed_timeout: Option<Duration>,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = FeedSources::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(port) => port.parse::<u16>().context("PORT must be a number")?,
            None => 3000,
        };

        let feed_timeout = non_empty("FEED_TIMEOUT_SECS")
            .map(|secs| secs.parse::<u64>())
            .transpose()
            .context("FEED_TIMEOUT_SECS must be a whole number of seconds")?
            .map(Duration::from_secs);

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: non_empty("DATABASE_URL"),
            feeds: FeedSources {
                ios_url: non_empty("IOS_FEED_URL").unwrap_or(defaults.ios_url),
                android_url: non_empty("ANDROID_FEED_URL").unwrap_or(defaults.android_url),
            },
            feed_timeout,
            static_dir: non_empty("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
        })
    }
}

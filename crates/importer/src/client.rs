use serde_json::Value;
use std::time::Duration;
use storage::models::Platform;
use tracing::debug;

use crate::error::Result;
use crate::traits::FeedFetcher;

pub const IOS_TOP_URL: &str =
    "https://wizz-technical-test-dev.s3.eu-west-3.amazonaws.com/ios.top100.json";
pub const ANDROID_TOP_URL: &str =
    "https://wizz-technical-test-dev.s3.eu-west-3.amazonaws.com/android.top100.json";

/// Where each platform's top-100 list lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSources {
    pub ios_url: String,
    pub android_url: String,
}

impl FeedSources {
    pub fn url_for(&self, platform: Platform) -> &str {
        match platform {
            Platform::Ios => &self.ios_url,
            Platform::Android => &self.android_url,
        }
    }
}

impl Default for FeedSources {
    fn default() -> Self {
        Self {
            ios_url: IOS_TOP_URL.to_string(),
            android_url: ANDROID_TOP_URL.to_string(),
        }
    }
}

pub struct HttpFeedClient {
    sources: FeedSources,
    client: reqwest::Client,
}

impl HttpFeedClient {
    pub fn new(sources: FeedSources) -> Result<Self> {
        Self::with_timeout(sources, None)
    }

    /// Without a timeout a stalled feed blocks the import indefinitely.
    pub fn with_timeout(sources: FeedSources, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("games-catalog/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            sources,
            client: builder.build()?,
        })
    }

    pub fn sources(&self) -> &FeedSources {
        &self.sources
    }
}

#[async_trait::async_trait]
impl FeedFetcher for HttpFeedClient {
    async fn fetch(&self, platform: Platform) -> Result<Value> {
        let url = self.sources.url_for(platform);
        debug!(%platform, url, "Fetching top chart feed");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(body)
    }
}

use crate::Result;
use serde_json::Value;
use storage::models::Platform;

/// Source of top-chart payloads, one per platform.
#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, platform: Platform) -> Result<Value>;
}

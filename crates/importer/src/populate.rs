use std::sync::Arc;
use storage::GameStore;
use storage::dto::game::{NewGame, PopulateResponse};
use storage::models::Platform;
use tracing::{info, warn};

use crate::Result;
use crate::feed::normalize_feed;
use crate::mapper::{MappedGame, map_game_payload};
use crate::traits::FeedFetcher;

pub const SUCCESS_MESSAGE: &str = "Successfully populated database";

/// Imports the iOS and Android top charts into a [`GameStore`].
pub struct TopChartsImporter {
    fetcher: Arc<dyn FeedFetcher>,
}

impl TopChartsImporter {
    pub fn new(fetcher: Arc<dyn FeedFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches both feeds, maps every record and creates the games that are not
    /// stored yet. Existing `(store_id, platform)` pairs are left untouched.
    ///
    /// Records are written one at a time and without a surrounding transaction:
    /// a storage failure aborts the run but keeps what was already created.
    pub async fn populate(&self, store: &dyn GameStore) -> Result<PopulateResponse> {
        let (ios_payload, android_payload) = tokio::try_join!(
            self.fetcher.fetch(Platform::Ios),
            self.fetcher.fetch(Platform::Android),
        )?;

        let mapped: Vec<MappedGame> = [
            (Platform::Ios, ios_payload),
            (Platform::Android, android_payload),
        ]
        .into_iter()
        .flat_map(|(platform, payload)| {
            normalize_feed(payload)
                .into_iter()
                .map(move |raw| map_game_payload(&raw, platform))
        })
        .collect();

        let total_processed = mapped.len();
        let valid: Vec<NewGame> = mapped
            .into_iter()
            .filter_map(MappedGame::into_new_game)
            .collect();
        let valid_processed = valid.len();

        if valid_processed != total_processed {
            warn!(
                "Games skipped due to missing storeId: {}",
                total_processed - valid_processed
            );
        }

        let mut created = 0;
        for game in &valid {
            let (_, was_created) = store.find_or_create(game).await?;
            if was_created {
                created += 1;
            }
        }

        info!(
            total_processed,
            valid_processed, created, "Top charts import finished"
        );

        Ok(PopulateResponse {
            message: SUCCESS_MESSAGE.to_string(),
            total_processed,
            valid_processed,
            created,
            skipped: valid_processed - created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImporterError;
    use serde_json::{Value, json};
    use storage::MemoryGameStore;
    use storage::dto::game::GameFilter;

    struct StaticFeeds {
        ios: Value,
        android: Value,
    }

    #[async_trait::async_trait]
    impl FeedFetcher for StaticFeeds {
        async fn fetch(&self, platform: Platform) -> crate::Result<Value> {
            Ok(match platform {
                Platform::Ios => self.ios.clone(),
                Platform::Android => self.android.clone(),
            })
        }
    }

    struct BrokenAndroidFeed;

    #[async_trait::async_trait]
    impl FeedFetcher for BrokenAndroidFeed {
        async fn fetch(&self, platform: Platform) -> crate::Result<Value> {
            match platform {
                Platform::Ios => Ok(json!([{"id": 1}])),
                Platform::Android => Err(ImporterError::ImportError(
                    "android feed returned 503".to_string(),
                )),
            }
        }
    }

    fn importer(ios: Value, android: Value) -> TopChartsImporter {
        TopChartsImporter::new(Arc::new(StaticFeeds { ios, android }))
    }

    #[tokio::test]
    async fn test_single_ios_record_is_created() {
        let store = MemoryGameStore::new();
        let report = importer(json!([{"app_id": "123", "name": "Foo"}]), json!([]))
            .populate(&store)
            .await
            .unwrap();

        assert_eq!(
            report,
            PopulateResponse {
                message: SUCCESS_MESSAGE.to_string(),
                total_processed: 1,
                valid_processed: 1,
                created: 1,
                skipped: 0,
            }
        );

        let games = store.list().await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].store_id, "123");
        assert_eq!(games[0].platform, Platform::Ios);
        assert_eq!(games[0].name, "Foo");
        assert!(games[0].is_published);
    }

    #[tokio::test]
    async fn test_grouped_feed_is_flattened() {
        let store = MemoryGameStore::new();
        let report = importer(json!({"games": [[{"id": 1}, {"id": 2}]]}), json!(null))
            .populate(&store)
            .await
            .unwrap();

        assert_eq!(report.total_processed, 2);
        assert_eq!(report.created, 2);

        let store_ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.store_id)
            .collect();
        assert_eq!(store_ids, vec!["1".to_string(), "2".to_string()]);
    }

    #[tokio::test]
    async fn test_records_without_identifier_never_reach_store() {
        let store = MemoryGameStore::new();
        let report = importer(
            json!([{"name": "Nameless"}, {"id": "ok"}]),
            json!({"data": [{"storeId": "", "title": "x"}]}),
        )
        .populate(&store)
        .await
        .unwrap();

        assert_eq!(report.total_processed, 3);
        assert_eq!(report.valid_processed, 1);
        assert_eq!(report.created, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_second_run_creates_nothing() {
        let store = MemoryGameStore::new();
        let importer = importer(
            json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]),
            json!({"data": [{"package_name": "com.a"}, {"packageName": "com.b"}]}),
        );

        let first = importer.populate(&store).await.unwrap();
        assert_eq!(first.created, 4);

        let second = importer.populate(&store).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 4);
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn test_duplicates_within_one_run_are_created_once() {
        let store = MemoryGameStore::new();
        let report = importer(
            json!([{"id": 9, "name": "First"}, {"store_id": "9", "name": "Second"}]),
            json!([{"id": 9}]),
        )
        .populate(&store)
        .await
        .unwrap();

        assert_eq!(report.valid_processed, 3);
        assert_eq!(report.created, 2);
        assert_eq!(report.skipped, 1);

        let ios = store
            .search(&GameFilter {
                name: None,
                platform: Some("ios".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(ios.len(), 1);
        assert_eq!(ios[0].name, "First");
    }

    #[tokio::test]
    async fn test_existing_games_are_not_updated() {
        let store = MemoryGameStore::new();
        store
            .create(&NewGame {
                publisher_id: None,
                name: "Hand made".to_string(),
                platform: Platform::Android,
                store_id: "com.a".to_string(),
                bundle_id: None,
                app_version: None,
                is_published: false,
            })
            .await
            .unwrap();

        let report = importer(json!([]), json!([{"package_name": "com.a", "name": "Feed"}]))
            .populate(&store)
            .await
            .unwrap();
        assert_eq!(report.created, 0);

        let games = store.list().await.unwrap();
        assert_eq!(games[0].name, "Hand made");
        assert!(!games[0].is_published);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_before_writing() {
        let store = MemoryGameStore::new();
        let importer = TopChartsImporter::new(Arc::new(BrokenAndroidFeed));

        let err = importer.populate(&store).await.unwrap_err();
        assert!(err.to_string().contains("android feed returned 503"));
        assert!(store.is_empty().await);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let report = PopulateResponse {
            message: SUCCESS_MESSAGE.to_string(),
            total_processed: 3,
            valid_processed: 2,
            created: 1,
            skipped: 1,
        };

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "message": SUCCESS_MESSAGE,
                "totalProcessed": 3,
                "validProcessed": 2,
                "created": 1,
                "skipped": 1,
            })
        );
    }
}

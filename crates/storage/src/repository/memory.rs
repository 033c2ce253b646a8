use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::game::GameStore;
use crate::dto::game::{GameFilter, NewGame, UpdateGameRequest};
use crate::error::{Result, StorageError};
use crate::models::{Game, Platform};

/// Process-local store with the same uniqueness rules as the `games` table.
#[derive(Debug, Default)]
pub struct MemoryGameStore {
    games: RwLock<Vec<Game>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

fn duplicate_key() -> StorageError {
    StorageError::ConstraintViolation(
        "a game with this storeId already exists for this platform".to_string(),
    )
}

fn has_key(games: &[Game], store_id: &str, platform: Platform, except: Option<Uuid>) -> bool {
    games.iter().any(|g| {
        g.store_id == store_id && g.platform == platform && Some(g.id) != except
    })
}

fn build(game: &NewGame) -> Game {
    let now = Utc::now().naive_utc();
    Game {
        id: Uuid::new_v4(),
        publisher_id: game.publisher_id.clone(),
        name: game.name.clone(),
        platform: game.platform,
        store_id: game.store_id.clone(),
        bundle_id: game.bundle_id.clone(),
        app_version: game.app_version.clone(),
        is_published: game.is_published,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait::async_trait]
impl GameStore for MemoryGameStore {
    async fn list(&self) -> Result<Vec<Game>> {
        Ok(self.games.read().await.clone())
    }

    async fn search(&self, filter: &GameFilter) -> Result<Vec<Game>> {
        let games = self.games.read().await;
        Ok(games.iter().filter(|g| filter.matches(g)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Game> {
        self.games
            .read()
            .await
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn create(&self, game: &NewGame) -> Result<Game> {
        let mut games = self.games.write().await;
        if has_key(&games, &game.store_id, game.platform, None) {
            return Err(duplicate_key());
        }

        let created = build(game);
        games.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: &UpdateGameRequest) -> Result<Game> {
        let mut games = self.games.write().await;
        let index = games
            .iter()
            .position(|g| g.id == id)
            .ok_or(StorageError::NotFound)?;

        let merged = changes.merge_into(&games[index]);
        if has_key(&games, &merged.store_id, merged.platform, Some(id)) {
            return Err(duplicate_key());
        }

        let game = &mut games[index];
        game.publisher_id = merged.publisher_id;
        game.name = merged.name;
        game.platform = merged.platform;
        game.store_id = merged.store_id;
        game.bundle_id = merged.bundle_id;
        game.app_version = merged.app_version;
        game.is_published = merged.is_published;
        game.updated_at = Utc::now().naive_utc();

        Ok(game.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|g| g.id != id);

        if games.len() == before {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn find_or_create(&self, game: &NewGame) -> Result<(Game, bool)> {
        let mut games = self.games.write().await;
        if let Some(existing) = games
            .iter()
            .find(|g| g.store_id == game.store_id && g.platform == game.platform)
        {
            return Ok((existing.clone(), false));
        }

        let created = build(game);
        games.push(created.clone());
        Ok((created, true))
    }
}

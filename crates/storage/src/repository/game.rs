use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::game::{GameFilter, NewGame, UpdateGameRequest};
use crate::error::{Result, StorageError};
use crate::models::Game;

/// Persistence capability for games, shared by the HTTP handlers and the importer.
#[async_trait::async_trait]
pub trait GameStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Game>>;

    async fn search(&self, filter: &GameFilter) -> Result<Vec<Game>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Game>;

    async fn create(&self, game: &NewGame) -> Result<Game>;

    async fn update(&self, id: Uuid, changes: &UpdateGameRequest) -> Result<Game>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Looks the game up by `(store_id, platform)` and inserts it only when absent.
    /// The flag is `true` when a row was created.
    async fn find_or_create(&self, game: &NewGame) -> Result<(Game, bool)>;
}

const GAME_COLUMNS: &str = "id, publisher_id, name, platform, store_id, bundle_id, app_version, \
                            is_published, created_at, updated_at";

pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_key(&self, store_id: &str, platform: &str) -> Result<Option<Game>> {
        let game = sqlx::query_as::<_, Game>(&format!(
            "SELECT {GAME_COLUMNS} FROM games WHERE store_id = $1 AND platform = $2"
        ))
        .bind(store_id)
        .bind(platform)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }
}

#[async_trait::async_trait]
impl GameStore for PgGameRepository {
    async fn list(&self) -> Result<Vec<Game>> {
        let games = sqlx::query_as::<_, Game>(&format!(
            "SELECT {GAME_COLUMNS} FROM games ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    async fn search(&self, filter: &GameFilter) -> Result<Vec<Game>> {
        let pattern = filter
            .name
            .as_deref()
            .map(|name| format!("%{}%", escape_like(name)));

        let games = sqlx::query_as::<_, Game>(&format!(
            r#"
            SELECT {GAME_COLUMNS}
            FROM games
            WHERE ($1::text IS NULL OR platform = $1)
              AND ($2::text IS NULL OR name ILIKE $2)
            ORDER BY created_at, id
            "#
        ))
        .bind(filter.platform.as_deref())
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Game> {
        sqlx::query_as::<_, Game>(&format!("SELECT {GAME_COLUMNS} FROM games WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn create(&self, game: &NewGame) -> Result<Game> {
        let created = sqlx::query_as::<_, Game>(&format!(
            r#"
            INSERT INTO games (publisher_id, name, platform, store_id, bundle_id, app_version, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {GAME_COLUMNS}
            "#
        ))
        .bind(&game.publisher_id)
        .bind(&game.name)
        .bind(game.platform.as_str())
        .bind(&game.store_id)
        .bind(&game.bundle_id)
        .bind(&game.app_version)
        .bind(game.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: &UpdateGameRequest) -> Result<Game> {
        let existing = self.find_by_id(id).await?;
        let merged = changes.merge_into(&existing);

        sqlx::query_as::<_, Game>(&format!(
            r#"
            UPDATE games
            SET publisher_id = $2,
                name = $3,
                platform = $4,
                store_id = $5,
                bundle_id = $6,
                app_version = $7,
                is_published = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {GAME_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&merged.publisher_id)
        .bind(&merged.name)
        .bind(merged.platform.as_str())
        .bind(&merged.store_id)
        .bind(&merged.bundle_id)
        .bind(&merged.app_version)
        .bind(merged.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify())?
        .ok_or(StorageError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn find_or_create(&self, game: &NewGame) -> Result<(Game, bool)> {
        let inserted = sqlx::query_as::<_, Game>(&format!(
            r#"
            INSERT INTO games (publisher_id, name, platform, store_id, bundle_id, app_version, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (store_id, platform) DO NOTHING
            RETURNING {GAME_COLUMNS}
            "#
        ))
        .bind(&game.publisher_id)
        .bind(&game.name)
        .bind(game.platform.as_str())
        .bind(&game.store_id)
        .bind(&game.bundle_id)
        .bind(&game.app_version)
        .bind(game.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        if let Some(created) = inserted {
            return Ok((created, true));
        }

        let existing = self
            .find_by_key(&game.store_id, game.platform.as_str())
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok((existing, false))
    }
}

/// Escapes LIKE wildcards so user input is matched literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

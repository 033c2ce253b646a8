use importer::{Result as ImportResult, TopChartsImporter};
use storage::{
    GameStore,
    dto::game::{
        CreateGameRequest, GameFilter, NewGame, PopulateResponse, SearchGamesRequest,
        UpdateGameRequest,
    },
    error::Result,
    models::Game,
};
use uuid::Uuid;

/// List all games
pub async fn list_games(store: &dyn GameStore) -> Result<Vec<Game>> {
    store.list().await
}

/// Search games by name and platform
pub async fn search_games(store: &dyn GameStore, request: &SearchGamesRequest) -> Result<Vec<Game>> {
    let filter = GameFilter::from(request);
    store.search(&filter).await
}

pub async fn create_game(store: &dyn GameStore, request: CreateGameRequest) -> Result<Game> {
    store.create(&NewGame::from(request)).await
}

pub async fn update_game(
    store: &dyn GameStore,
    id: Uuid,
    request: &UpdateGameRequest,
) -> Result<Game> {
    store.update(id, request).await
}

pub async fn delete_game(store: &dyn GameStore, id: Uuid) -> Result<()> {
    store.delete(id).await
}

/// Run the top charts import against the store
pub async fn populate_games(
    importer: &TopChartsImporter,
    store: &dyn GameStore,
) -> ImportResult<PopulateResponse> {
    importer.populate(store).await
}

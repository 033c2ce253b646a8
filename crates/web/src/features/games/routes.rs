use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{
    create_game, delete_game, list_games, populate_games, search_games, update_game,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_games).post(create_game))
        .route("/search", post(search_games))
        .route("/populate", post(populate_games))
        .route("/:id", put(update_game).delete(delete_game))
}

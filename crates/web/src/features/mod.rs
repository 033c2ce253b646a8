pub mod games;

use axum::Router;

use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/games", games::routes::routes())
        .with_state(state)
}

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use storage::dto::game::{
    CreateGameRequest, DeletedGameResponse, PopulateResponse, SearchGamesRequest,
    UpdateGameRequest,
};
use storage::models::Game;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/games",
    responses(
        (status = 200, description = "List all games successfully", body = Vec<Game>)
    ),
    tag = "games"
)]
pub async fn list_games(State(state): State<AppState>) -> Result<Response, WebError> {
    let games = services::list_games(state.store.as_ref()).await?;

    Ok(Json(games).into_response())
}

#[utoipa::path(
    post,
    path = "/api/games/search",
    request_body = SearchGamesRequest,
    responses(
        (status = 200, description = "Games matching the name and platform filters", body = Vec<Game>),
        (status = 400, description = "Malformed search body")
    ),
    tag = "games"
)]
pub async fn search_games(
    State(state): State<AppState>,
    payload: Result<Json<SearchGamesRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    let games = services::search_games(state.store.as_ref(), &req).await?;

    Ok(Json(games).into_response())
}

#[utoipa::path(
    post,
    path = "/api/games",
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created successfully", body = Game),
        (status = 400, description = "Malformed body, validation error or duplicate (storeId, platform)")
    ),
    tag = "games"
)]
pub async fn create_game(
    State(state): State<AppState>,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let game = services::create_game(state.store.as_ref(), req).await?;
    tracing::info!(id = %game.id, store_id = %game.store_id, "Game created");

    Ok(Json(game).into_response())
}

#[utoipa::path(
    put,
    path = "/api/games/{id}",
    params(
        ("id" = Uuid, Path, description = "Game id")
    ),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated successfully", body = Game),
        (status = 400, description = "Malformed body, validation error or duplicate (storeId, platform)"),
        (status = 404, description = "Game not found")
    ),
    tag = "games"
)]
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateGameRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated = services::update_game(state.store.as_ref(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/games/{id}",
    params(
        ("id" = Uuid, Path, description = "Game id")
    ),
    responses(
        (status = 200, description = "Game deleted successfully", body = DeletedGameResponse),
        (status = 404, description = "Game not found")
    ),
    tag = "games"
)]
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_game(state.store.as_ref(), id).await?;
    tracing::info!(%id, "Game deleted");

    Ok(Json(DeletedGameResponse { id }).into_response())
}

#[utoipa::path(
    post,
    path = "/api/games/populate",
    responses(
        (status = 200, description = "Top charts imported", body = PopulateResponse),
        (status = 500, description = "A feed could not be fetched or a game could not be stored")
    ),
    tag = "games"
)]
pub async fn populate_games(State(state): State<AppState>) -> Result<Response, WebError> {
    let report = services::populate_games(&state.importer, state.store.as_ref()).await?;

    Ok(Json(report).into_response())
}

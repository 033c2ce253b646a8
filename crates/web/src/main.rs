use anyhow::Context;
use importer::{HttpFeedClient, TopChartsImporter};
use std::sync::Arc;
use storage::{Database, GameStore, MemoryGameStore, PgGameRepository};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod state;

use config::Config;
use features::games::handlers;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_games,
        handlers::search_games,
        handlers::create_game,
        handlers::update_game,
        handlers::delete_game,
        handlers::populate_games,
    ),
    components(
        schemas(
            storage::dto::game::CreateGameRequest,
            storage::dto::game::UpdateGameRequest,
            storage::dto::game::SearchGamesRequest,
            storage::dto::game::PopulateResponse,
            storage::dto::game::DeletedGameResponse,
            storage::models::Game,
            storage::models::Platform,
        )
    ),
    tags(
        (name = "games", description = "Games catalog endpoints"),
    )
)]
struct ApiDoc;

async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn GameStore>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL is not set, games are kept in memory only");
        return Ok(Arc::new(MemoryGameStore::new()));
    };

    tracing::info!(
        "Connecting to database at: {}",
        database_url.split('@').next_back().unwrap_or("unknown")
    );
    let db = Database::new(database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(PgGameRepository::new(db.pool().clone())))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting games catalog API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let store = connect_store(&config).await?;

    let feed_client = HttpFeedClient::with_timeout(config.feeds.clone(), config.feed_timeout)
        .context("Failed to build feed HTTP client")?;
    let state = AppState::new(store, TopChartsImporter::new(Arc::new(feed_client)));

    let app = features::api_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Server is up at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}

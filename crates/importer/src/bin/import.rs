use clap::Parser;
use importer::client::{ANDROID_TOP_URL, IOS_TOP_URL};
use importer::{FeedSources, HttpFeedClient, TopChartsImporter};
use std::sync::Arc;
use std::time::Duration;
use storage::{Database, GameStore, MemoryGameStore, PgGameRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "games-import")]
#[command(about = "Imports the iOS and Android top-100 charts into the games catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", required_unless_present = "dry_run")]
    database_url: Option<String>,

    #[arg(long, env = "IOS_FEED_URL", default_value = IOS_TOP_URL)]
    ios_url: String,

    #[arg(long, env = "ANDROID_FEED_URL", default_value = ANDROID_TOP_URL)]
    android_url: String,

    /// Per-request timeout for the feed downloads, in seconds.
    #[arg(long, env = "FEED_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Import into a throwaway in-memory store and only report the counts.
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("import={},importer={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let sources = FeedSources {
        ios_url: cli.ios_url,
        android_url: cli.android_url,
    };
    tracing::info!("iOS feed: {}", sources.ios_url);
    tracing::info!("Android feed: {}", sources.android_url);

    let client = HttpFeedClient::with_timeout(sources, cli.timeout_secs.map(Duration::from_secs))?;
    let importer = TopChartsImporter::new(Arc::new(client));

    let store: Box<dyn GameStore> = match cli.database_url {
        Some(url) if !cli.dry_run => {
            tracing::info!("Connecting to database...");
            let db = Database::new(&url).await?;
            db.run_migrations().await?;
            Box::new(PgGameRepository::new(db.pool().clone()))
        }
        _ => {
            tracing::info!("Dry run: importing into an in-memory store");
            Box::new(MemoryGameStore::new())
        }
    };

    let report = importer.populate(store.as_ref()).await?;

    tracing::info!("{}", report.message);
    tracing::info!(
        "Processed {} records, {} valid: {} created, {} already present",
        report.total_processed,
        report.valid_processed,
        report.created,
        report.skipped
    );

    Ok(())
}

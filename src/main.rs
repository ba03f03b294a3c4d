use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use newsfeed::{
    ArticleRepository, ArticleService, Config, Database, FeedUpdater, Ingestor, RssFetcher,
    SystemClock, WebServer,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    // Initialize logging
    if let Err(e) = newsfeed::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        newsfeed::logging::init_console_only(&config.logging.level);
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> newsfeed::Result<()> {
    info!("newsfeed {}", env!("CARGO_PKG_VERSION"));

    let db = Database::open(&config.database).await?;
    let repository = ArticleRepository::new(db.pool().clone());

    let fetcher = RssFetcher::new(&config.feed)?;
    let ingestor = Ingestor::new(
        fetcher,
        repository.clone(),
        &config.feed,
        config.articles.store_timeout(),
        Arc::new(SystemClock),
    );
    let updater = FeedUpdater::new(ingestor, config.feed.refresh_interval()).spawn();

    let service = ArticleService::new(
        repository,
        config.articles.page_size,
        config.articles.store_timeout(),
    );
    let server = WebServer::new(&config.server, service)?;
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    let served = server.run(shutdown_signal()).await;

    info!("Stopping feed updater");
    updater.stop().await;
    db.pool().close().await;

    served
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use album_catalog_server::album::{
    mongo_store, AlbumManager, AlbumRepository, InMemoryAlbumRepository, MongoAlbumRepository,
};
use album_catalog_server::config::{self, StoreBackend};
use album_catalog_server::server::{self, run_server, RequestsLoggingLevel};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, env = "ALBUMS_PORT", default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping). 0 disables it.
    #[clap(long, env = "ALBUMS_METRICS_PORT", default_value_t = config::DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Which album store backend to use.
    #[clap(long, env = "ALBUMS_STORE", value_enum, default_value = "mongodb")]
    pub store: StoreBackend,

    /// MongoDB connection string.
    #[clap(long, env = "ALBUMS_MONGODB_URI", default_value = config::DEFAULT_MONGODB_URI)]
    pub mongodb_uri: String,

    /// Database holding the album collection.
    #[clap(long, env = "ALBUMS_DATABASE", default_value = config::DEFAULT_DATABASE)]
    pub database: String,

    /// Collection holding album documents.
    #[clap(long, env = "ALBUMS_COLLECTION", default_value = config::DEFAULT_COLLECTION)]
    pub collection: String,

    /// Timeout in seconds for each store operation.
    #[clap(long, default_value_t = config::DEFAULT_STORE_TIMEOUT_SEC)]
    pub store_timeout_sec: u64,

    /// Timeout in seconds for a whole HTTP request.
    #[clap(long, default_value_t = config::DEFAULT_REQUEST_TIMEOUT_SEC)]
    pub request_timeout_sec: u64,

    /// Seconds to wait for in-flight requests after a shutdown signal.
    #[clap(long, default_value_t = config::DEFAULT_SHUTDOWN_GRACE_SEC)]
    pub shutdown_grace_sec: u64,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            store: args.store,
            mongodb_uri: args.mongodb_uri.clone(),
            database: args.database.clone(),
            collection: args.collection.clone(),
            store_timeout_sec: args.store_timeout_sec,
            request_timeout_sec: args.request_timeout_sec,
            shutdown_grace_sec: args.shutdown_grace_sec,
        }
    }
}

/// Resolves once the process receives Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration:");
    info!("  port: {}", app_config.port);
    info!("  metrics_port: {}", app_config.metrics_port);
    info!("  store: {:?}", app_config.store.backend);
    info!(
        "  collection: {}.{}",
        app_config.store.database, app_config.store.collection
    );

    info!("Initializing metrics...");
    server::metrics::init_metrics();

    let mut mongo_client = None;
    let repository: Arc<dyn AlbumRepository> = match app_config.store.backend {
        StoreBackend::Mongodb => {
            info!("Connecting to MongoDB...");
            let client =
                mongo_store::connect(&app_config.store.mongodb_uri, app_config.store.timeout)
                    .await
                    .context("Failed to connect to MongoDB")?;
            info!("Connected to MongoDB");
            let repository = MongoAlbumRepository::new(
                &client,
                &app_config.store.database,
                &app_config.store.collection,
            );
            mongo_client = Some(client);
            Arc::new(repository)
        }
        StoreBackend::Memory => {
            warn!("Using in-memory album store, data will not survive a restart");
            Arc::new(InMemoryAlbumRepository::new())
        }
    };

    let album_service = Arc::new(AlbumManager::new(repository, app_config.store.timeout));

    let shutdown_token = CancellationToken::new();
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    let result = run_server(app_config.server_config(), album_service, shutdown_token).await;

    if let Some(client) = mongo_client {
        info!("Closing MongoDB connection");
        client.shutdown().await;
    }

    result?;
    info!("Server gracefully stopped");
    Ok(())
}

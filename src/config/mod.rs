mod file_config;

pub use file_config::{FileConfig, StoreConfig};

use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_METRICS_PORT: u16 = 9091;
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "albumdb";
pub const DEFAULT_COLLECTION: &str = "albummeta";
pub const DEFAULT_STORE_TIMEOUT_SEC: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;
pub const DEFAULT_SHUTDOWN_GRACE_SEC: u64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    #[default]
    Mongodb,
    Memory,
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub store: StoreBackend,
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
    pub store_timeout_sec: u64,
    pub request_timeout_sec: u64,
    pub shutdown_grace_sec: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            port: DEFAULT_PORT,
            metrics_port: DEFAULT_METRICS_PORT,
            logging_level: RequestsLoggingLevel::default(),
            store: StoreBackend::default(),
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            store_timeout_sec: DEFAULT_STORE_TIMEOUT_SEC,
            request_timeout_sec: DEFAULT_REQUEST_TIMEOUT_SEC,
            shutdown_grace_sec: DEFAULT_SHUTDOWN_GRACE_SEC,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub request_timeout: Duration,
    pub shutdown_grace: Duration,
    pub store: StoreSettings,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
    /// Bound applied to every store round trip.
    pub timeout: Duration,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if metrics_port != 0 && metrics_port == port {
            bail!("metrics_port must differ from port ({})", port);
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let request_timeout_sec = file.request_timeout_sec.unwrap_or(cli.request_timeout_sec);
        let shutdown_grace_sec = file.shutdown_grace_sec.unwrap_or(cli.shutdown_grace_sec);

        let store_file = file.store.unwrap_or_default();
        let backend = match store_file.backend {
            Some(name) => parse_store_backend(&name)
                .ok_or_else(|| anyhow!("Unknown store backend: {}", name))?,
            None => cli.store,
        };
        let store = StoreSettings {
            backend,
            mongodb_uri: store_file
                .mongodb_uri
                .unwrap_or_else(|| cli.mongodb_uri.clone()),
            database: store_file
                .database
                .unwrap_or_else(|| cli.database.clone()),
            collection: store_file
                .collection
                .unwrap_or_else(|| cli.collection.clone()),
            timeout: Duration::from_secs(store_file.timeout_sec.unwrap_or(cli.store_timeout_sec)),
        };

        if store.database.trim().is_empty() {
            bail!("database name must not be empty");
        }
        if store.collection.trim().is_empty() {
            bail!("collection name must not be empty");
        }
        if store.backend == StoreBackend::Mongodb && !is_mongodb_uri(&store.mongodb_uri) {
            bail!("mongodb_uri must start with mongodb:// or mongodb+srv://");
        }
        if store.timeout.is_zero() {
            bail!("store timeout must be greater than zero");
        }
        if request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than zero");
        }

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            request_timeout: Duration::from_secs(request_timeout_sec),
            shutdown_grace: Duration::from_secs(shutdown_grace_sec),
            store,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            request_timeout: self.request_timeout,
            shutdown_grace: self.shutdown_grace,
        }
    }
}

fn is_mongodb_uri(uri: &str) -> bool {
    uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

fn parse_store_backend(s: &str) -> Option<StoreBackend> {
    StoreBackend::from_str(s, true).ok()
}

//! Test server lifecycle management
//!
//! Each test gets an isolated server backed by its own in-memory album store.

use super::constants::*;
use super::fixtures::seeded_albums;
use album_catalog_server::album::{Album, AlbumManager, InMemoryAlbumRepository};
use album_catalog_server::server::{server::make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Test server instance with an isolated album store
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Album store for direct inspection in tests
    pub repository: Arc<InMemoryAlbumRepository>,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server seeded with the albums from `fixtures.rs`
    pub async fn spawn() -> Self {
        Self::spawn_with(seeded_albums()).await
    }

    /// Spawns a server with an empty album store
    pub async fn spawn_empty() -> Self {
        Self::spawn_with(Vec::new()).await
    }

    /// Spawns a server on a random port with the given albums stored
    ///
    /// # Panics
    ///
    /// Panics if port binding fails or the server doesn't become ready in time.
    pub async fn spawn_with(albums: Vec<Album>) -> Self {
        let repository = Arc::new(InMemoryAlbumRepository::with_albums(albums));
        let album_service = Arc::new(AlbumManager::new(
            repository.clone(),
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            metrics_port: 0,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, album_service);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            repository,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the search endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client
                .get(format!("{}/albums/search?q=ready", self.base_url))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

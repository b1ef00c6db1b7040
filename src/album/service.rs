use super::{Album, AlbumError, AlbumRepository, AlbumResult};
use crate::server::metrics::record_store_operation;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Operations exposed to the transport layer.
#[async_trait]
pub trait AlbumService: Send + Sync {
    async fn create_album(&self, album: Album) -> AlbumResult<()>;
    async fn get_album(&self, album_id: &str) -> AlbumResult<Album>;
    async fn update_album(&self, album_id: &str, update: Album) -> AlbumResult<()>;
    async fn delete_album(&self, album_id: &str) -> AlbumResult<()>;
    async fn get_songs_with_capital_titles(&self) -> AlbumResult<Vec<String>>;
    async fn search_albums(&self, term: &str) -> AlbumResult<Vec<Album>>;
}

/// Delegates every operation to the repository, bounding each store round
/// trip by `operation_timeout`.
pub struct AlbumManager {
    repository: Arc<dyn AlbumRepository>,
    operation_timeout: Duration,
}

impl AlbumManager {
    pub fn new(repository: Arc<dyn AlbumRepository>, operation_timeout: Duration) -> Self {
        AlbumManager {
            repository,
            operation_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, future: F) -> AlbumResult<T>
    where
        F: Future<Output = AlbumResult<T>> + Send,
    {
        let start = Instant::now();
        let result = match tokio::time::timeout(self.operation_timeout, future).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Store operation {} timed out after {:?}",
                    operation, self.operation_timeout
                );
                Err(AlbumError::Timeout {
                    operation,
                    after: self.operation_timeout,
                })
            }
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => err.kind(),
        };
        record_store_operation(operation, outcome, start.elapsed());
        result
    }
}

#[async_trait]
impl AlbumService for AlbumManager {
    async fn create_album(&self, album: Album) -> AlbumResult<()> {
        self.bounded("create_album", self.repository.create_album(album))
            .await
    }

    async fn get_album(&self, album_id: &str) -> AlbumResult<Album> {
        self.bounded("get_album", self.repository.get_album(album_id))
            .await
    }

    async fn update_album(&self, album_id: &str, update: Album) -> AlbumResult<()> {
        self.bounded(
            "update_album",
            self.repository.update_album(album_id, update),
        )
        .await
    }

    async fn delete_album(&self, album_id: &str) -> AlbumResult<()> {
        self.bounded("delete_album", self.repository.delete_album(album_id))
            .await
    }

    async fn get_songs_with_capital_titles(&self) -> AlbumResult<Vec<String>> {
        self.bounded(
            "get_songs_with_capital_titles",
            self.repository.get_songs_with_capital_titles(),
        )
        .await
    }

    async fn search_albums(&self, term: &str) -> AlbumResult<Vec<Album>> {
        self.bounded("search_albums", self.repository.search_albums(term))
            .await
    }
}

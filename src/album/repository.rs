//! AlbumRepository trait definition.
//!
//! Abstracts the document store so the service can run against MongoDB in
//! production and against the in-memory store in tests.

use super::{Album, AlbumResult};
use async_trait::async_trait;

/// Data access for the album collection.
///
/// Every lookup, update and delete goes through the business key
/// (`album_id`), never the store-assigned identifier.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// Insert a new album. The store assigns its identifier.
    async fn create_album(&self, album: Album) -> AlbumResult<()>;

    /// Get the album with the given business key, or `AlbumError::NotFound`.
    async fn get_album(&self, album_id: &str) -> AlbumResult<Album>;

    /// Overwrite every settable field of the album with the given business
    /// key. Fails with `AlbumError::NotFound` when nothing matches.
    async fn update_album(&self, album_id: &str, update: Album) -> AlbumResult<()>;

    /// Delete the album with the given business key. Deleting a missing
    /// album is not an error.
    async fn delete_album(&self, album_id: &str) -> AlbumResult<()>;

    /// Titles starting with an uppercase Latin letter, in store order.
    async fn get_songs_with_capital_titles(&self) -> AlbumResult<Vec<String>>;

    /// Albums whose title matches `term` case-insensitively, or whose
    /// release date equals `term`.
    async fn search_albums(&self, term: &str) -> AlbumResult<Vec<Album>>;
}

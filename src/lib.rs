//! Album Catalog Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod album;
pub mod config;
pub mod server;

// Re-export commonly used types for convenience
pub use album::{
    Album, AlbumError, AlbumManager, AlbumRepository, AlbumService, InMemoryAlbumRepository,
    MongoAlbumRepository,
};
pub use server::{run_server, RequestsLoggingLevel};

mod error;
pub mod filters;
mod memory_store;
mod models;
pub mod mongo_store;
mod repository;
mod service;

pub use error::{AlbumError, AlbumResult};
pub use memory_store::InMemoryAlbumRepository;
pub use models::{Album, Platforms};
pub use mongo_store::MongoAlbumRepository;
#[cfg(any(test, feature = "mock"))]
pub use repository::MockAlbumRepository;
pub use repository::AlbumRepository;
pub use service::{AlbumManager, AlbumService};

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("album not found: {album_id}")]
    NotFound { album_id: String },

    /// The store could not compile the search term as a pattern.
    #[error("invalid search term: {0}")]
    InvalidSearchTerm(String),

    #[error("document store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("failed to encode album document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl AlbumError {
    pub fn not_found(album_id: &str) -> Self {
        AlbumError::NotFound {
            album_id: album_id.to_owned(),
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AlbumError::NotFound { .. } => "not_found",
            AlbumError::InvalidSearchTerm(_) => "invalid_search_term",
            AlbumError::Store(_) => "store",
            AlbumError::Encode(_) => "encode",
            AlbumError::Timeout { .. } => "timeout",
        }
    }
}

pub type AlbumResult<T> = std::result::Result<T, AlbumError>;

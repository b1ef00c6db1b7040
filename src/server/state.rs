use axum::extract::FromRef;

use crate::album::AlbumService;
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedAlbumService = Arc<dyn AlbumService>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub album_service: GuardedAlbumService,
}

impl ServerState {
    pub fn new(config: ServerConfig, album_service: GuardedAlbumService) -> Self {
        ServerState {
            config,
            album_service,
        }
    }
}

impl FromRef<ServerState> for GuardedAlbumService {
    fn from_ref(input: &ServerState) -> Self {
        input.album_service.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

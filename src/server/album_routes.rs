//! Album HTTP routes.
//!
//! Provides endpoints for:
//! - Album CRUD by business key
//! - Free-text search over titles and release dates
//! - Listing titles that start with a capital letter

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::album::{Album, AlbumError};
use crate::server::state::{GuardedAlbumService, ServerState};

pub const CREATE_ALBUM_PATH: &str = "/addalbums";
pub const GET_ALBUM_PATH: &str = "/getbyIdalbums/{id}";
pub const UPDATE_ALBUM_PATH: &str = "/updatealbums/{id}";
pub const DELETE_ALBUM_PATH: &str = "/deletealbums/{id}";
pub const SEARCH_ALBUMS_PATH: &str = "/albums/search";
pub const CAPITAL_TITLES_PATH: &str = "/getSongsWithCapitalTitles";

const INVALID_BODY_MESSAGE: &str = "Invalid request body";
const MISSING_SEARCH_TERM_MESSAGE: &str = "Search term is required";

// =============================================================================
// Request Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// =============================================================================
// Error Mapping
// =============================================================================

fn error_response(err: AlbumError) -> Response {
    let status = match &err {
        AlbumError::NotFound { .. } => StatusCode::NOT_FOUND,
        AlbumError::InvalidSearchTerm(_) => StatusCode::BAD_REQUEST,
        AlbumError::Store(_) | AlbumError::Encode(_) | AlbumError::Timeout { .. } => {
            error!("Album operation failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string()).into_response()
}

fn invalid_body(rejection: JsonRejection) -> Response {
    debug!("Rejected album body: {}", rejection.body_text());
    (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /addalbums
async fn create_album(
    State(album_service): State<GuardedAlbumService>,
    payload: Result<Json<Album>, JsonRejection>,
) -> Response {
    let Json(album) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(rejection),
    };

    match album_service.create_album(album).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /getbyIdalbums/{id}
async fn get_album(
    State(album_service): State<GuardedAlbumService>,
    Path(album_id): Path<String>,
) -> Response {
    info!("Attempting to retrieve album with ID: {}", album_id);
    match album_service.get_album(&album_id).await {
        Ok(album) => Json(album).into_response(),
        Err(err) => error_response(err),
    }
}

/// PUT /updatealbums/{id}
async fn update_album(
    State(album_service): State<GuardedAlbumService>,
    Path(album_id): Path<String>,
    payload: Result<Json<Album>, JsonRejection>,
) -> Response {
    let Json(update) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(rejection),
    };

    match album_service.update_album(&album_id, update).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => error_response(err),
    }
}

/// DELETE /deletealbums/{id}
async fn delete_album(
    State(album_service): State<GuardedAlbumService>,
    Path(album_id): Path<String>,
) -> Response {
    match album_service.delete_album(&album_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /albums/search?q=
async fn search_albums(
    State(album_service): State<GuardedAlbumService>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let term = match query.q.filter(|q| !q.is_empty()) {
        Some(term) => term,
        None => return (StatusCode::BAD_REQUEST, MISSING_SEARCH_TERM_MESSAGE).into_response(),
    };

    match album_service.search_albums(&term).await {
        Ok(albums) => Json(albums).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /getSongsWithCapitalTitles
async fn get_songs_with_capital_titles(
    State(album_service): State<GuardedAlbumService>,
) -> Response {
    match album_service.get_songs_with_capital_titles().await {
        Ok(titles) => Json(titles).into_response(),
        Err(err) => error_response(err),
    }
}

pub fn make_album_routes(state: ServerState) -> Router {
    Router::new()
        .route(CREATE_ALBUM_PATH, post(create_album))
        .route(GET_ALBUM_PATH, get(get_album))
        .route(UPDATE_ALBUM_PATH, put(update_album))
        .route(DELETE_ALBUM_PATH, delete(delete_album))
        .route(SEARCH_ALBUMS_PATH, get(search_albums))
        .route(CAPITAL_TITLES_PATH, get(get_songs_with_capital_titles))
        .with_state(state)
}

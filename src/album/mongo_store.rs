//! MongoDB-backed album repository.

use super::filters;
use super::models::{Album, Platforms};
use super::{AlbumError, AlbumRepository, AlbumResult};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_document};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

const APP_NAME: &str = "album-catalog-server";

/// Server error codes for a `$regex` pattern that does not compile
/// (`Location51091` on current servers, `BadValue` on older ones).
const INVALID_REGEX_CODES: [i32; 2] = [51091, 2];

/// Shape of an album inside the collection.
#[derive(Debug, Serialize, Deserialize)]
struct AlbumDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(default)]
    album_id: String,
    #[serde(rename = "songtitle", default)]
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    producer: String,
    #[serde(default)]
    writer: String,
    #[serde(rename = "releaseDate", default)]
    release_date: String,
    #[serde(default)]
    platforms: Platforms,
}

impl AlbumDocument {
    /// Builds a document without an identifier, the store fills it in on insert.
    fn without_id(album: Album) -> Self {
        AlbumDocument {
            id: None,
            album_id: album.album_id,
            title: album.title,
            artist: album.artist,
            producer: album.producer,
            writer: album.writer,
            release_date: album.release_date,
            platforms: album.platforms,
        }
    }
}

impl From<AlbumDocument> for Album {
    fn from(document: AlbumDocument) -> Self {
        Album {
            id: document.id.map(|id| id.to_hex()),
            album_id: document.album_id,
            title: document.title,
            artist: document.artist,
            producer: document.producer,
            writer: document.writer,
            release_date: document.release_date,
            platforms: document.platforms,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TitleDocument {
    #[serde(rename = "songtitle", default)]
    title: String,
}

/// Opens a client and verifies the deployment answers a `ping` before
/// handing it out.
pub async fn connect(uri: &str, timeout: Duration) -> AlbumResult<Client> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some(APP_NAME.to_owned());
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);

    let client = Client::with_options(options)?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;
    Ok(client)
}

pub struct MongoAlbumRepository {
    collection: Collection<AlbumDocument>,
}

impl MongoAlbumRepository {
    /// The client is owned by the caller, who is also responsible for
    /// shutting it down.
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        info!(
            "Using MongoDB collection {}.{} for albums",
            database, collection
        );
        MongoAlbumRepository {
            collection: client.database(database).collection(collection),
        }
    }
}

#[async_trait]
impl AlbumRepository for MongoAlbumRepository {
    async fn create_album(&self, album: Album) -> AlbumResult<()> {
        let result = self
            .collection
            .insert_one(AlbumDocument::without_id(album))
            .await?;
        debug!("Inserted album document {:?}", result.inserted_id);
        Ok(())
    }

    async fn get_album(&self, album_id: &str) -> AlbumResult<Album> {
        debug!("Attempting to retrieve album with ID: {}", album_id);
        match self
            .collection
            .find_one(filters::by_album_id(album_id))
            .await?
        {
            Some(document) => Ok(document.into()),
            None => {
                debug!("Album with ID {} not found", album_id);
                Err(AlbumError::not_found(album_id))
            }
        }
    }

    async fn update_album(&self, album_id: &str, update: Album) -> AlbumResult<()> {
        let fields = to_document(&AlbumDocument::without_id(
            update.settable_fields(album_id),
        ))?;
        let result = self
            .collection
            .update_one(filters::by_album_id(album_id), doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Err(AlbumError::not_found(album_id));
        }
        debug!(
            "Updated album {} (matched {}, modified {})",
            album_id, result.matched_count, result.modified_count
        );
        Ok(())
    }

    async fn delete_album(&self, album_id: &str) -> AlbumResult<()> {
        let result = self
            .collection
            .delete_one(filters::by_album_id(album_id))
            .await?;
        if result.deleted_count == 0 {
            debug!("No album with ID {} to delete", album_id);
        }
        Ok(())
    }

    async fn get_songs_with_capital_titles(&self) -> AlbumResult<Vec<String>> {
        let filter = filters::capital_titles();
        debug!("Filter used for capital titles: {}", filter);

        let mut cursor = self
            .collection
            .clone_with_type::<TitleDocument>()
            .find(filter)
            .projection(filters::title_projection())
            .await
            .inspect_err(|err| warn!("Error finding documents with capital titles: {}", err))?;

        let mut titles = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .inspect_err(|err| warn!("Error iterating capital titles: {}", err))?
        {
            titles.push(document.title);
        }

        debug!("Found {} songs with capital titles", titles.len());
        Ok(titles)
    }

    async fn search_albums(&self, term: &str) -> AlbumResult<Vec<Album>> {
        let cursor = self
            .collection
            .find(filters::search(term))
            .await
            .map_err(search_error)?;
        let documents: Vec<AlbumDocument> = cursor.try_collect().await.map_err(search_error)?;
        debug!("Search for {:?} matched {} albums", term, documents.len());
        Ok(documents.into_iter().map(Album::from).collect())
    }
}

/// Pattern compile failures are the caller's fault, anything else is the store's.
fn search_error(err: mongodb::error::Error) -> AlbumError {
    if let ErrorKind::Command(command) = err.kind.as_ref() {
        if INVALID_REGEX_CODES.contains(&command.code) {
            debug!("Search pattern rejected by the server: {}", command.message);
            return AlbumError::InvalidSearchTerm(command.message.clone());
        }
    }
    AlbumError::Store(err)
}

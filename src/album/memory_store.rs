//! In-memory album repository.
//!
//! Mirrors the MongoDB filter semantics so it can stand in for the real store
//! in tests and local runs. Albums are kept in insertion order, which is the
//! order scans return them in.

use super::filters::CAPITAL_TITLE_PATTERN;
use super::{Album, AlbumError, AlbumRepository, AlbumResult};
use async_trait::async_trait;
use lazy_static::lazy_static;
use mongodb::bson::oid::ObjectId;
use regex::{Regex, RegexBuilder};
use std::sync::Mutex;

lazy_static! {
    static ref CAPITAL_TITLE_REGEX: Regex =
        Regex::new(CAPITAL_TITLE_PATTERN).expect("Invalid capital title pattern");
}

#[derive(Default)]
pub struct InMemoryAlbumRepository {
    albums: Mutex<Vec<Album>>,
}

impl InMemoryAlbumRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository, assigning identifiers to albums that lack one.
    pub fn with_albums(albums: Vec<Album>) -> Self {
        let albums = albums
            .into_iter()
            .map(|album| Album {
                id: album.id.or_else(|| Some(ObjectId::new().to_hex())),
                ..album
            })
            .collect();
        InMemoryAlbumRepository {
            albums: Mutex::new(albums),
        }
    }

    pub fn len(&self) -> usize {
        self.albums.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AlbumRepository for InMemoryAlbumRepository {
    async fn create_album(&self, album: Album) -> AlbumResult<()> {
        let stored = Album {
            id: Some(ObjectId::new().to_hex()),
            ..album
        };
        self.albums.lock().unwrap().push(stored);
        Ok(())
    }

    async fn get_album(&self, album_id: &str) -> AlbumResult<Album> {
        self.albums
            .lock()
            .unwrap()
            .iter()
            .find(|album| album.album_id == album_id)
            .cloned()
            .ok_or_else(|| AlbumError::not_found(album_id))
    }

    async fn update_album(&self, album_id: &str, update: Album) -> AlbumResult<()> {
        let mut albums = self.albums.lock().unwrap();
        let stored = albums
            .iter_mut()
            .find(|album| album.album_id == album_id)
            .ok_or_else(|| AlbumError::not_found(album_id))?;

        let id = stored.id.take();
        *stored = Album {
            id,
            ..update.settable_fields(album_id)
        };
        Ok(())
    }

    async fn delete_album(&self, album_id: &str) -> AlbumResult<()> {
        let mut albums = self.albums.lock().unwrap();
        if let Some(position) = albums.iter().position(|album| album.album_id == album_id) {
            albums.remove(position);
        }
        Ok(())
    }

    async fn get_songs_with_capital_titles(&self) -> AlbumResult<Vec<String>> {
        Ok(self
            .albums
            .lock()
            .unwrap()
            .iter()
            .filter(|album| CAPITAL_TITLE_REGEX.is_match(&album.title))
            .map(|album| album.title.clone())
            .collect())
    }

    async fn search_albums(&self, term: &str) -> AlbumResult<Vec<Album>> {
        let title_regex = RegexBuilder::new(term)
            .case_insensitive(true)
            .build()
            .map_err(|err| AlbumError::InvalidSearchTerm(err.to_string()))?;
        Ok(self
            .albums
            .lock()
            .unwrap()
            .iter()
            .filter(|album| title_regex.is_match(&album.title) || album.release_date == term)
            .cloned()
            .collect())
    }
}

//! HTTP client for end-to-end tests
//!
//! Wraps reqwest and provides one method per album endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde::Serialize;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // CRUD Endpoints
    // ========================================================================

    /// POST /addalbums
    pub async fn create_album<T: Serialize + ?Sized>(&self, album: &T) -> Response {
        self.client
            .post(format!("{}/addalbums", self.base_url))
            .json(album)
            .send()
            .await
            .expect("Create album request failed")
    }

    /// POST /addalbums with an arbitrary JSON body
    pub async fn create_album_raw(&self, body: &str) -> Response {
        self.client
            .post(format!("{}/addalbums", self.base_url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()
            .await
            .expect("Create album request failed")
    }

    /// GET /getbyIdalbums/{id}
    pub async fn get_album(&self, album_id: &str) -> Response {
        self.client
            .get(format!("{}/getbyIdalbums/{}", self.base_url, album_id))
            .send()
            .await
            .expect("Get album request failed")
    }

    /// PUT /updatealbums/{id}
    pub async fn update_album<T: Serialize + ?Sized>(&self, album_id: &str, update: &T) -> Response {
        self.client
            .put(format!("{}/updatealbums/{}", self.base_url, album_id))
            .json(update)
            .send()
            .await
            .expect("Update album request failed")
    }

    /// PUT /updatealbums/{id} with an arbitrary JSON body
    pub async fn update_album_raw(&self, album_id: &str, body: &str) -> Response {
        self.client
            .put(format!("{}/updatealbums/{}", self.base_url, album_id))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()
            .await
            .expect("Update album request failed")
    }

    /// DELETE /deletealbums/{id}
    pub async fn delete_album(&self, album_id: &str) -> Response {
        self.client
            .delete(format!("{}/deletealbums/{}", self.base_url, album_id))
            .send()
            .await
            .expect("Delete album request failed")
    }

    // ========================================================================
    // Query Endpoints
    // ========================================================================

    /// GET /albums/search?q=
    pub async fn search(&self, term: &str) -> Response {
        self.client
            .get(format!("{}/albums/search", self.base_url))
            .query(&[("q", term)])
            .send()
            .await
            .expect("Search request failed")
    }

    /// GET /albums/search with no query string
    pub async fn search_without_term(&self) -> Response {
        self.client
            .get(format!("{}/albums/search", self.base_url))
            .send()
            .await
            .expect("Search request failed")
    }

    /// GET /getSongsWithCapitalTitles
    pub async fn get_songs_with_capital_titles(&self) -> Response {
        self.client
            .get(format!("{}/getSongsWithCapitalTitles", self.base_url))
            .send()
            .await
            .expect("Capital titles request failed")
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Availability flags per streaming platform.
///
/// Each platform carries an opaque key/value mapping rather than a single
/// boolean; consumers decide what the keys mean.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platforms {
    #[serde(rename = "AmazonMusic")]
    pub amazon_music: HashMap<String, bool>,
    #[serde(rename = "JioSaavn")]
    pub jio_saavn: HashMap<String, bool>,
    #[serde(rename = "Gaana")]
    pub gaana: HashMap<String, bool>,
}

/// An album record as exchanged over HTTP.
///
/// `id` is assigned by the store and never trusted from clients, `album_id`
/// is the business key every lookup goes through.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub album_id: String,
    pub title: String,
    pub artist: String,
    pub producer: String,
    pub writer: String,
    pub release_date: String,
    pub platforms: Platforms,
}

impl Album {
    /// Copy of `self` with the store identifier dropped and the business key
    /// replaced, which is what an update is allowed to write.
    pub fn settable_fields(&self, album_id: &str) -> Album {
        Album {
            id: None,
            album_id: album_id.to_owned(),
            ..self.clone()
        }
    }
}

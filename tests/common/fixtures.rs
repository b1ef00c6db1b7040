//! Seed data for end-to-end tests

use super::constants::*;
use album_catalog_server::album::{Album, Platforms};
use std::collections::HashMap;

pub fn album(album_id: &str, title: &str, release_date: &str) -> Album {
    Album {
        album_id: album_id.to_string(),
        title: title.to_string(),
        release_date: release_date.to_string(),
        ..Default::default()
    }
}

/// Albums every `TestServer` starts with.
pub fn seeded_albums() -> Vec<Album> {
    let mut love_story = album(ALBUM_1_ID, ALBUM_1_TITLE, ALBUM_1_RELEASE_DATE);
    love_story.artist = "Taylor Swift".to_string();
    love_story.producer = "Nathan Chapman".to_string();
    love_story.writer = "Taylor Swift".to_string();
    love_story.platforms = Platforms {
        amazon_music: HashMap::from([("available".to_string(), true)]),
        jio_saavn: HashMap::from([("available".to_string(), false)]),
        gaana: HashMap::new(),
    };

    vec![
        love_story,
        album(ALBUM_2_ID, ALBUM_2_TITLE, "1981-06-01"),
        album(ALBUM_3_ID, ALBUM_3_TITLE, ALBUM_3_RELEASE_DATE),
        album(ALBUM_4_ID, ALBUM_4_TITLE, "2003-11-14"),
    ]
}

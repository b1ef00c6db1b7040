//! Query filters for the album collection.
//!
//! Field names here are the ones documents are stored with, which differ
//! from the JSON names used over HTTP for the title and release date.

use mongodb::bson::{doc, Document, Regex};

pub const ALBUM_ID_FIELD: &str = "album_id";
pub const TITLE_FIELD: &str = "songtitle";
pub const RELEASE_DATE_FIELD: &str = "releaseDate";

/// Titles starting with an uppercase Latin letter. Case sensitive.
pub const CAPITAL_TITLE_PATTERN: &str = "^[A-Z]";

/// Regex options applied to free-text title search.
pub const SEARCH_REGEX_OPTIONS: &str = "i";

/// Selects the album(s) carrying the given business key.
pub fn by_album_id(album_id: &str) -> Document {
    doc! { ALBUM_ID_FIELD: album_id }
}

/// Selects every album whose title starts with a capital letter.
pub fn capital_titles() -> Document {
    doc! { TITLE_FIELD: { "$regex": CAPITAL_TITLE_PATTERN } }
}

/// Only the title is needed when listing capitalized titles.
pub fn title_projection() -> Document {
    doc! { TITLE_FIELD: 1, "_id": 0 }
}

/// Title matching `term` case-insensitively, or release date equal to `term`.
pub fn search(term: &str) -> Document {
    let title_regex = Regex {
        pattern: term.to_owned(),
        options: SEARCH_REGEX_OPTIONS.to_owned(),
    };
    doc! {
        "$or": [
            { TITLE_FIELD: title_regex },
            { RELEASE_DATE_FIELD: term },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn business_key_filter_targets_album_id() {
        let filter = by_album_id("a-42");
        assert_eq!(filter, doc! { "album_id": "a-42" });
        assert!(filter.get("_id").is_none());
    }

    #[test]
    fn capital_titles_filter_is_case_sensitive_regex() {
        let filter = capital_titles();
        let condition = filter.get_document("songtitle").unwrap();
        assert_eq!(condition.get_str("$regex").unwrap(), "^[A-Z]");
        assert!(condition.get("$options").is_none());
    }

    #[test]
    fn projection_keeps_only_title() {
        assert_eq!(title_projection(), doc! { "songtitle": 1, "_id": 0 });
    }

    #[test]
    fn search_filter_ors_title_regex_and_exact_release_date() {
        let filter = search("love");
        let branches = filter.get_array("$or").unwrap();
        assert_eq!(branches.len(), 2);

        match &branches[0] {
            Bson::Document(title) => match title.get("songtitle") {
                Some(Bson::RegularExpression(regex)) => {
                    assert_eq!(regex.pattern, "love");
                    assert_eq!(regex.options, "i");
                }
                other => panic!("Unexpected title condition: {:?}", other),
            },
            other => panic!("Unexpected branch: {:?}", other),
        }

        assert_eq!(
            branches[1],
            Bson::Document(doc! { "releaseDate": "love" })
        );
    }

    #[test]
    fn search_term_is_passed_through_as_pattern() {
        let filter = search("^The.*");
        let branches = filter.get_array("$or").unwrap();
        let title = branches[0].as_document().unwrap();
        match title.get("songtitle") {
            Some(Bson::RegularExpression(regex)) => assert_eq!(regex.pattern, "^The.*"),
            other => panic!("Unexpected title condition: {:?}", other),
        }
    }
}

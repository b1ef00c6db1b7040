//! Shared constants for end-to-end tests
//!
//! When the seeded albums change, update only this file and `fixtures.rs`.

// ============================================================================
// Seeded Album IDs
// ============================================================================

/// "Love Story", capitalised title, released 2008
pub const ALBUM_1_ID: &str = "album-1";

/// "endless love", lowercase title
pub const ALBUM_2_ID: &str = "album-2";

/// "Midnight Rain", capitalised title, released 2022
pub const ALBUM_3_ID: &str = "album-3";

/// "99 Problems", title starting with a digit
pub const ALBUM_4_ID: &str = "album-4";

/// Business key that is never seeded
pub const MISSING_ALBUM_ID: &str = "album-missing";

// ============================================================================
// Seeded Album Data
// ============================================================================

pub const ALBUM_1_TITLE: &str = "Love Story";
pub const ALBUM_2_TITLE: &str = "endless love";
pub const ALBUM_3_TITLE: &str = "Midnight Rain";
pub const ALBUM_4_TITLE: &str = "99 Problems";

pub const ALBUM_1_RELEASE_DATE: &str = "2008-09-12";
pub const ALBUM_3_RELEASE_DATE: &str = "2022-10-21";

pub const SEEDED_ALBUM_COUNT: usize = 4;

// ============================================================================
// Timing
// ============================================================================

/// How long to wait for a spawned server to answer
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Delay between readiness checks
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Per-request timeout for the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

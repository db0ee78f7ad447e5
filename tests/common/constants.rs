//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When fixture data changes (names, ages, derived IDs, etc.),
//! update only this file.

// ============================================================================
// Fixture Artists
// ============================================================================

/// Artist 1 name
pub const ARTIST_1_NAME: &str = "Radiohead";

/// Artist 1 age
pub const ARTIST_1_AGE: i64 = 57;

/// Derived ID for "Radiohead"
pub const ARTIST_1_ID: &str = "UmFkaW9oZWFk";

/// Artist 2 name
pub const ARTIST_2_NAME: &str = "Portishead";

/// Artist 2 age
pub const ARTIST_2_AGE: i64 = 34;

/// Derived ID for "Portishead"
pub const ARTIST_2_ID: &str = "UG9ydGlzaGVhZA==";

// ============================================================================
// Fixture Albums
// ============================================================================

/// Album 1 name, belongs to artist 1
pub const ALBUM_1_NAME: &str = "OK Computer";

/// Album 1 genre
pub const ALBUM_1_GENRE: &str = "Alternative Rock";

/// Derived ID for "OK Computer" under artist 1
pub const ALBUM_1_ID: &str = "T0sgQ29tcHV0ZXI6VW1Ga2";

/// Album 2 name, belongs to artist 1
pub const ALBUM_2_NAME: &str = "In Rainbows";

/// Album 2 genre
pub const ALBUM_2_GENRE: &str = "Art Rock";

/// Derived ID for "In Rainbows" under artist 1
pub const ALBUM_2_ID: &str = "SW4gUmFpbmJvd3M6VW1Ga2";

/// Album 3 name, belongs to artist 2
pub const ALBUM_3_NAME: &str = "Dummy";

/// Album 3 genre
pub const ALBUM_3_GENRE: &str = "Trip-Hop";

/// Derived ID for "Dummy" under artist 2
pub const ALBUM_3_ID: &str = "RHVtbXk6VUc5eWRHbHphR1";

// ============================================================================
// Fixture Tracks
// ============================================================================

/// Track 1 name, on album 1
pub const TRACK_1_NAME: &str = "Paranoid Android";

/// Track 1 duration (seconds)
pub const TRACK_1_DURATION: f64 = 383.0;

/// Derived ID for "Paranoid Android" on album 1
pub const TRACK_1_ID: &str = "UGFyYW5vaWQgQW5kcm9pZD";

/// Track 2 name, on album 1
pub const TRACK_2_NAME: &str = "Karma Police";

/// Track 2 duration (seconds)
pub const TRACK_2_DURATION: f64 = 261.0;

/// Derived ID for "Karma Police" on album 1
pub const TRACK_2_ID: &str = "S2FybWEgUG9saWNlOlQwc2";

/// Track 3 name, on album 2
pub const TRACK_3_NAME: &str = "Nude";

/// Track 3 duration (seconds)
pub const TRACK_3_DURATION: f64 = 255.0;

/// Derived ID for "Nude" on album 2
pub const TRACK_3_ID: &str = "TnVkZTpTVzRnVW1GcGJtSn";

/// Track 4 name, on album 3
pub const TRACK_4_NAME: &str = "Glory Box";

/// Track 4 duration (seconds)
pub const TRACK_4_DURATION: f64 = 305.0;

/// Derived ID for "Glory Box" on album 3
pub const TRACK_4_ID: &str = "R2xvcnkgQm94OlJIVnRiWG";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

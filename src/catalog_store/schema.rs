//! SQLite schema for the catalog database.
//!
//! There are no foreign keys between the three tables: parent/child
//! relationships go through stored link urls, matched by exact string
//! equality. The link columns carry indices so dependent lookups and
//! cascades stay cheap.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

/// Artists table. The id is derived from the name, so names are unique
/// per table by construction.
const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("age", &SqlType::Integer, non_null = true),
        sqlite_column!("albums_link", &SqlType::Text, non_null = true),
        sqlite_column!("tracks_link", &SqlType::Text, non_null = true),
        sqlite_column!("self_link", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

/// Albums table. `artist_link` holds the owning artist's self url.
const ALBUMS_TABLE: Table = Table {
    name: "albums",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("genre", &SqlType::Text, non_null = true),
        sqlite_column!("artist_link", &SqlType::Text, non_null = true),
        sqlite_column!("tracks_link", &SqlType::Text, non_null = true),
        sqlite_column!("self_link", &SqlType::Text, non_null = true),
        sqlite_column!("artist_id", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_albums_artist_link", "artist_link")],
};

/// Tracks table. `artist_link` and `album_link` hold the owning artist's
/// and album's self urls.
const TRACKS_TABLE: Table = Table {
    name: "tracks",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("duration", &SqlType::Real, non_null = true),
        sqlite_column!(
            "times_played",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!("album_id", &SqlType::Text, non_null = true),
        sqlite_column!("artist_link", &SqlType::Text, non_null = true),
        sqlite_column!("album_link", &SqlType::Text, non_null = true),
        sqlite_column!("self_link", &SqlType::Text, non_null = true),
    ],
    indices: &[
        ("idx_tracks_artist_link", "artist_link"),
        ("idx_tracks_album_link", "album_link"),
    ],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[ARTISTS_TABLE, ALBUMS_TABLE, TRACKS_TABLE],
    migration: None,
}];

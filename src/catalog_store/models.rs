//! Catalog models for the SQLite-backed storage.
//!
//! These structs double as the wire shapes: every link a resource exposes
//! (`self`, parent and child collection urls) is computed once at creation
//! time and persisted verbatim, so serialization is a plain field dump.

use serde::{Deserialize, Serialize};

/// An artist with links to its album and track collections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub age: i64,
    /// Url of this artist's album collection.
    #[serde(rename = "albums")]
    pub albums_link: String,
    /// Url of this artist's track collection.
    #[serde(rename = "tracks")]
    pub tracks_link: String,
    #[serde(rename = "self")]
    pub self_link: String,
}

/// An album, tied to its artist through the stored artist url.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub genre: String,
    /// Url of the owning artist. Dependents are matched by exact equality
    /// against this string, never by joining on ids.
    #[serde(rename = "artist")]
    pub artist_link: String,
    #[serde(rename = "tracks")]
    pub tracks_link: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub artist_id: String,
}

/// A track with its play counter and links to the owning album and artist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Duration in seconds.
    pub duration: f64,
    pub times_played: i64,
    pub album_id: String,
    #[serde(rename = "artist")]
    pub artist_link: String,
    #[serde(rename = "album")]
    pub album_link: String,
    #[serde(rename = "self")]
    pub self_link: String,
}

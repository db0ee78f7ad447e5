//! CatalogStore trait definition.
//!
//! This trait abstracts catalog storage so the server only depends on the
//! operations it routes, not on the SQLite implementation behind them.

use anyhow::Result;

use super::{Album, Artist, Track};

/// Outcome of a create operation.
///
/// Ids are derived from the payload, so a create can land on a row that is
/// already stored. `Conflict` carries that existing row untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome<T> {
    Created(T),
    Conflict(T),
}

/// Trait for catalog storage backends.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Artists
    // =========================================================================

    /// List all artists.
    fn list_artists(&self) -> Result<Vec<Artist>>;

    /// Get an artist by ID.
    fn get_artist(&self, id: &str) -> Result<Option<Artist>>;

    /// Create an artist. Returns the existing artist when the derived id is
    /// already taken.
    fn create_artist(&self, name: &str, age: i64) -> Result<CreateOutcome<Artist>>;

    /// Delete an artist together with its albums and tracks.
    /// Returns false when no artist has that id.
    fn delete_artist(&self, id: &str) -> Result<bool>;

    /// List the albums that belong to an artist.
    /// `None` means the artist does not exist.
    fn list_artist_albums(&self, artist_id: &str) -> Result<Option<Vec<Album>>>;

    /// List the tracks that belong to an artist.
    /// `None` means the artist does not exist.
    fn list_artist_tracks(&self, artist_id: &str) -> Result<Option<Vec<Track>>>;

    /// Increment the play count of every track on every album of an artist.
    /// Returns false when no artist has that id.
    fn play_artist(&self, id: &str) -> Result<bool>;

    // =========================================================================
    // Albums
    // =========================================================================

    /// List all albums.
    fn list_albums(&self) -> Result<Vec<Album>>;

    /// Get an album by ID.
    fn get_album(&self, id: &str) -> Result<Option<Album>>;

    /// Create an album under an artist. Outer `None` means the artist does
    /// not exist; `Conflict` carries the album already stored under the
    /// derived id.
    fn create_album(
        &self,
        artist_id: &str,
        name: &str,
        genre: &str,
    ) -> Result<Option<CreateOutcome<Album>>>;

    /// Delete an album together with its tracks.
    /// Returns false when no album has that id.
    fn delete_album(&self, id: &str) -> Result<bool>;

    /// List the tracks on an album.
    /// `None` means the album does not exist.
    fn list_album_tracks(&self, album_id: &str) -> Result<Option<Vec<Track>>>;

    /// Increment the play count of every track on an album.
    /// Returns false when no album has that id.
    fn play_album(&self, id: &str) -> Result<bool>;

    // =========================================================================
    // Tracks
    // =========================================================================

    /// List all tracks.
    fn list_tracks(&self) -> Result<Vec<Track>>;

    /// Get a track by ID.
    fn get_track(&self, id: &str) -> Result<Option<Track>>;

    /// Create a track on an album. Outer `None` means the album does not
    /// exist; `Conflict` carries the track already stored under the
    /// derived id.
    fn create_track(
        &self,
        album_id: &str,
        name: &str,
        duration: f64,
    ) -> Result<Option<CreateOutcome<Track>>>;

    /// Delete a track by ID. Returns false when no track has that id.
    fn delete_track(&self, id: &str) -> Result<bool>;

    /// Increment the play count of a track.
    /// Returns false when no track has that id.
    fn play_track(&self, id: &str) -> Result<bool>;

    // =========================================================================
    // Counts
    // =========================================================================

    /// Get the number of artists in the catalog.
    fn get_artists_count(&self) -> usize;

    /// Get the number of albums in the catalog.
    fn get_albums_count(&self) -> usize;

    /// Get the number of tracks in the catalog.
    fn get_tracks_count(&self) -> usize;
}

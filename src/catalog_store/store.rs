//! SQLite-backed catalog store implementation.
//!
//! Rows reference their parents through stored link urls rather than
//! foreign keys, so cascades and child listings are plain queries over
//! the indexed link columns.

use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::{CatalogStore, CreateOutcome};
use crate::resource_id;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// SQLite-backed catalog store.
///
/// All access goes through a single connection behind a mutex. Writes that
/// touch more than one row run inside a transaction so a failed create or
/// cascade leaves the database untouched.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
    base_url: String,
}

impl SqliteCatalogStore {
    /// Open the catalog database at `db_path`, creating it when missing.
    ///
    /// `base_url` is the absolute prefix baked into the link urls of every
    /// row created through this store.
    pub fn new<T: AsRef<Path>>(db_path: T, base_url: &str) -> Result<Self> {
        let conn = if db_path.as_ref().exists() {
            Connection::open_with_flags(
                db_path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?
        } else {
            let conn = Connection::open(db_path)?;
            CATALOG_VERSIONED_SCHEMAS.last().unwrap().create(&conn)?;
            conn
        };

        // Read the database version
        let db_version = conn
            .query_row("PRAGMA user_version;", [], |row| row.get::<usize, i64>(0))
            .context("Failed to read database version")?
            - BASE_DB_VERSION as i64;

        if db_version < 0 {
            bail!(
                "Database version {} is too old, does not contain base db version {}",
                db_version,
                BASE_DB_VERSION
            );
        }
        let version = db_version as usize;

        if db_version >= CATALOG_VERSIONED_SCHEMAS.len() as i64 {
            bail!("Database version {} is too new", db_version);
        } else {
            CATALOG_VERSIONED_SCHEMAS
                .get(version)
                .context("Failed to get schema")?
                .validate(&conn)?;
        }

        Self::migrate_if_needed(&conn, version)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        let artist_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM artists", [], |r| r.get(0))
            .unwrap_or(0);
        let album_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM albums", [], |r| r.get(0))
            .unwrap_or(0);
        let track_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tracks", [], |r| r.get(0))
            .unwrap_or(0);

        info!(
            "Opened catalog db: {} artists, {} albums, {} tracks",
            artist_count, album_count, track_count
        );

        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn migrate_if_needed(conn: &Connection, version: usize) -> Result<()> {
        let mut latest_from = version;
        for schema in CATALOG_VERSIONED_SCHEMAS.iter().skip(version + 1) {
            if let Some(migration_fn) = schema.migration {
                info!(
                    "Migrating catalog db from version {} to {}",
                    latest_from, schema.version
                );
                migration_fn(conn)?;
                latest_from = schema.version;
            }
        }
        conn.execute(
            &format!("PRAGMA user_version = {}", BASE_DB_VERSION + latest_from),
            [],
        )?;

        Ok(())
    }

    // =========================================================================
    // Internal Helper Methods
    // =========================================================================

    /// Parse an Artist from a row (id, name, age, albums_link, tracks_link, self_link).
    fn parse_artist_row(row: &rusqlite::Row) -> rusqlite::Result<Artist> {
        Ok(Artist {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            albums_link: row.get(3)?,
            tracks_link: row.get(4)?,
            self_link: row.get(5)?,
        })
    }

    /// Parse an Album from a row (id, name, genre, artist_link, tracks_link, self_link, artist_id).
    fn parse_album_row(row: &rusqlite::Row) -> rusqlite::Result<Album> {
        Ok(Album {
            id: row.get(0)?,
            name: row.get(1)?,
            genre: row.get(2)?,
            artist_link: row.get(3)?,
            tracks_link: row.get(4)?,
            self_link: row.get(5)?,
            artist_id: row.get(6)?,
        })
    }

    /// Parse a Track from a row (id, name, duration, times_played, album_id,
    /// artist_link, album_link, self_link).
    fn parse_track_row(row: &rusqlite::Row) -> rusqlite::Result<Track> {
        Ok(Track {
            id: row.get(0)?,
            name: row.get(1)?,
            duration: row.get(2)?,
            times_played: row.get(3)?,
            album_id: row.get(4)?,
            artist_link: row.get(5)?,
            album_link: row.get(6)?,
            self_link: row.get(7)?,
        })
    }

    fn fetch_artist(conn: &Connection, id: &str) -> Result<Option<Artist>> {
        match conn.query_row(
            "SELECT id, name, age, albums_link, tracks_link, self_link
             FROM artists WHERE id = ?1",
            params![id],
            Self::parse_artist_row,
        ) {
            Ok(artist) => Ok(Some(artist)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn fetch_album(conn: &Connection, id: &str) -> Result<Option<Album>> {
        match conn.query_row(
            "SELECT id, name, genre, artist_link, tracks_link, self_link, artist_id
             FROM albums WHERE id = ?1",
            params![id],
            Self::parse_album_row,
        ) {
            Ok(album) => Ok(Some(album)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn fetch_track(conn: &Connection, id: &str) -> Result<Option<Track>> {
        match conn.query_row(
            "SELECT id, name, duration, times_played, album_id, artist_link, album_link, self_link
             FROM tracks WHERE id = ?1",
            params![id],
            Self::parse_track_row,
        ) {
            Ok(track) => Ok(Some(track)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn fetch_tracks_by_link(
        conn: &Connection,
        link_column: &str,
        link: &str,
    ) -> Result<Vec<Track>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, duration, times_played, album_id, artist_link, album_link, self_link
             FROM tracks WHERE {} = ?1",
            link_column
        ))?;
        let tracks = stmt
            .query_map(params![link], Self::parse_track_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tracks)
    }
}

impl CatalogStore for SqliteCatalogStore {
    // =========================================================================
    // Artists
    // =========================================================================

    fn list_artists(&self) -> Result<Vec<Artist>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, age, albums_link, tracks_link, self_link FROM artists",
        )?;
        let artists = stmt
            .query_map([], Self::parse_artist_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    fn get_artist(&self, id: &str) -> Result<Option<Artist>> {
        let conn = self.conn.lock().unwrap();
        Self::fetch_artist(&conn, id)
    }

    fn create_artist(&self, name: &str, age: i64) -> Result<CreateOutcome<Artist>> {
        let id = resource_id::derive_id(name);
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        if let Some(existing) = Self::fetch_artist(&tx, &id)? {
            return Ok(CreateOutcome::Conflict(existing));
        }

        let self_link = format!("{}/artists/{}", self.base_url, id);
        let artist = Artist {
            id,
            name: name.to_string(),
            age,
            albums_link: format!("{}/albums", self_link),
            tracks_link: format!("{}/tracks", self_link),
            self_link,
        };
        tx.execute(
            "INSERT INTO artists (id, name, age, albums_link, tracks_link, self_link)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &artist.id,
                &artist.name,
                artist.age,
                &artist.albums_link,
                &artist.tracks_link,
                &artist.self_link
            ],
        )
        .context("Failed to insert artist")?;
        tx.commit()?;

        Ok(CreateOutcome::Created(artist))
    }

    fn delete_artist(&self, id: &str) -> Result<bool> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let artist = match Self::fetch_artist(&tx, id)? {
            Some(artist) => artist,
            None => return Ok(false),
        };

        tx.execute(
            "DELETE FROM tracks WHERE artist_link = ?1",
            params![&artist.self_link],
        )?;
        tx.execute(
            "DELETE FROM albums WHERE artist_link = ?1",
            params![&artist.self_link],
        )?;
        tx.execute("DELETE FROM artists WHERE id = ?1", params![id])?;
        tx.commit()?;

        Ok(true)
    }

    fn list_artist_albums(&self, artist_id: &str) -> Result<Option<Vec<Album>>> {
        let conn = self.conn.lock().unwrap();
        let artist = match Self::fetch_artist(&conn, artist_id)? {
            Some(artist) => artist,
            None => return Ok(None),
        };

        let mut stmt = conn.prepare(
            "SELECT id, name, genre, artist_link, tracks_link, self_link, artist_id
             FROM albums WHERE artist_link = ?1",
        )?;
        let albums = stmt
            .query_map(params![&artist.self_link], Self::parse_album_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(albums))
    }

    fn list_artist_tracks(&self, artist_id: &str) -> Result<Option<Vec<Track>>> {
        let conn = self.conn.lock().unwrap();
        let artist = match Self::fetch_artist(&conn, artist_id)? {
            Some(artist) => artist,
            None => return Ok(None),
        };
        let tracks = Self::fetch_tracks_by_link(&conn, "artist_link", &artist.self_link)?;
        Ok(Some(tracks))
    }

    fn play_artist(&self, id: &str) -> Result<bool> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let artist = match Self::fetch_artist(&tx, id)? {
            Some(artist) => artist,
            None => return Ok(false),
        };

        // Play counts live on tracks, reached through the artist's albums.
        tx.execute(
            "UPDATE tracks SET times_played = times_played + 1
             WHERE album_link IN (SELECT self_link FROM albums WHERE artist_link = ?1)",
            params![&artist.self_link],
        )?;
        tx.commit()?;

        Ok(true)
    }

    // =========================================================================
    // Albums
    // =========================================================================

    fn list_albums(&self) -> Result<Vec<Album>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, genre, artist_link, tracks_link, self_link, artist_id FROM albums",
        )?;
        let albums = stmt
            .query_map([], Self::parse_album_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(albums)
    }

    fn get_album(&self, id: &str) -> Result<Option<Album>> {
        let conn = self.conn.lock().unwrap();
        Self::fetch_album(&conn, id)
    }

    fn create_album(
        &self,
        artist_id: &str,
        name: &str,
        genre: &str,
    ) -> Result<Option<CreateOutcome<Album>>> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let artist = match Self::fetch_artist(&tx, artist_id)? {
            Some(artist) => artist,
            None => return Ok(None),
        };

        let id = resource_id::derive_id(&resource_id::child_key(name, &artist.id));
        if let Some(existing) = Self::fetch_album(&tx, &id)? {
            return Ok(Some(CreateOutcome::Conflict(existing)));
        }

        let self_link = format!("{}/albums/{}", self.base_url, id);
        let album = Album {
            id,
            name: name.to_string(),
            genre: genre.to_string(),
            artist_link: artist.self_link,
            tracks_link: format!("{}/tracks", self_link),
            self_link,
            artist_id: artist.id,
        };
        tx.execute(
            "INSERT INTO albums (id, name, genre, artist_link, tracks_link, self_link, artist_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &album.id,
                &album.name,
                &album.genre,
                &album.artist_link,
                &album.tracks_link,
                &album.self_link,
                &album.artist_id
            ],
        )
        .context("Failed to insert album")?;
        tx.commit()?;

        Ok(Some(CreateOutcome::Created(album)))
    }

    fn delete_album(&self, id: &str) -> Result<bool> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let album = match Self::fetch_album(&tx, id)? {
            Some(album) => album,
            None => return Ok(false),
        };

        tx.execute(
            "DELETE FROM tracks WHERE album_link = ?1",
            params![&album.self_link],
        )?;
        tx.execute("DELETE FROM albums WHERE id = ?1", params![id])?;
        tx.commit()?;

        Ok(true)
    }

    fn list_album_tracks(&self, album_id: &str) -> Result<Option<Vec<Track>>> {
        let conn = self.conn.lock().unwrap();
        let album = match Self::fetch_album(&conn, album_id)? {
            Some(album) => album,
            None => return Ok(None),
        };
        let tracks = Self::fetch_tracks_by_link(&conn, "album_link", &album.self_link)?;
        Ok(Some(tracks))
    }

    fn play_album(&self, id: &str) -> Result<bool> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let album = match Self::fetch_album(&tx, id)? {
            Some(album) => album,
            None => return Ok(false),
        };

        tx.execute(
            "UPDATE tracks SET times_played = times_played + 1 WHERE album_link = ?1",
            params![&album.self_link],
        )?;
        tx.commit()?;

        Ok(true)
    }

    // =========================================================================
    // Tracks
    // =========================================================================

    fn list_tracks(&self) -> Result<Vec<Track>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, duration, times_played, album_id, artist_link, album_link, self_link
             FROM tracks",
        )?;
        let tracks = stmt
            .query_map([], Self::parse_track_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tracks)
    }

    fn get_track(&self, id: &str) -> Result<Option<Track>> {
        let conn = self.conn.lock().unwrap();
        Self::fetch_track(&conn, id)
    }

    fn create_track(
        &self,
        album_id: &str,
        name: &str,
        duration: f64,
    ) -> Result<Option<CreateOutcome<Track>>> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let album = match Self::fetch_album(&tx, album_id)? {
            Some(album) => album,
            None => return Ok(None),
        };

        let id = resource_id::derive_id(&resource_id::child_key(name, &album.id));
        if let Some(existing) = Self::fetch_track(&tx, &id)? {
            return Ok(Some(CreateOutcome::Conflict(existing)));
        }

        let self_link = format!("{}/tracks/{}", self.base_url, id);
        let track = Track {
            id,
            name: name.to_string(),
            duration,
            times_played: 0,
            album_id: album.id,
            artist_link: album.artist_link,
            album_link: album.self_link,
            self_link,
        };
        tx.execute(
            "INSERT INTO tracks (id, name, duration, times_played, album_id, artist_link, album_link, self_link)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &track.id,
                &track.name,
                track.duration,
                track.times_played,
                &track.album_id,
                &track.artist_link,
                &track.album_link,
                &track.self_link
            ],
        )
        .context("Failed to insert track")?;
        tx.commit()?;

        Ok(Some(CreateOutcome::Created(track)))
    }

    fn delete_track(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM tracks WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    fn play_track(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE tracks SET times_played = times_played + 1 WHERE id = ?1",
            params![id],
        )?;
        Ok(updated > 0)
    }

    // =========================================================================
    // Counts
    // =========================================================================

    fn get_artists_count(&self) -> usize {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM artists", [], |r| r.get::<_, i64>(0))
            .unwrap_or(0) as usize
    }

    fn get_albums_count(&self) -> usize {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM albums", [], |r| r.get::<_, i64>(0))
            .unwrap_or(0) as usize
    }

    fn get_tracks_count(&self) -> usize {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM tracks", [], |r| r.get::<_, i64>(0))
            .unwrap_or(0) as usize
    }
}

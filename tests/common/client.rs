//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all fonoteca-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    /// Creates a new client pointed at the given server
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Service Info
    // ========================================================================

    /// GET /
    pub async fn get_service_info(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Get service info request failed")
    }

    // ========================================================================
    // Artist Endpoints
    // ========================================================================

    /// GET /artists
    pub async fn list_artists(&self) -> Response {
        self.client
            .get(format!("{}/artists", self.base_url))
            .send()
            .await
            .expect("List artists request failed")
    }

    /// POST /artists
    pub async fn create_artist(&self, name: &str, age: i64) -> Response {
        self.client
            .post(format!("{}/artists", self.base_url))
            .json(&json!({ "name": name, "age": age }))
            .send()
            .await
            .expect("Create artist request failed")
    }

    /// GET /artists/{id}
    pub async fn get_artist(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/artists/{}", self.base_url, id))
            .send()
            .await
            .expect("Get artist request failed")
    }

    /// DELETE /artists/{id}
    pub async fn delete_artist(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/artists/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete artist request failed")
    }

    /// GET /artists/{id}/albums
    pub async fn get_artist_albums(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/artists/{}/albums", self.base_url, id))
            .send()
            .await
            .expect("Get artist albums request failed")
    }

    /// POST /artists/{id}/albums
    pub async fn create_album(&self, artist_id: &str, name: &str, genre: &str) -> Response {
        self.client
            .post(format!("{}/artists/{}/albums", self.base_url, artist_id))
            .json(&json!({ "name": name, "genre": genre }))
            .send()
            .await
            .expect("Create album request failed")
    }

    /// GET /artists/{id}/tracks
    pub async fn get_artist_tracks(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/artists/{}/tracks", self.base_url, id))
            .send()
            .await
            .expect("Get artist tracks request failed")
    }

    /// PUT /artists/{id}/albums/play
    pub async fn play_artist(&self, id: &str) -> Response {
        self.client
            .put(format!("{}/artists/{}/albums/play", self.base_url, id))
            .send()
            .await
            .expect("Play artist request failed")
    }

    // ========================================================================
    // Album Endpoints
    // ========================================================================

    /// GET /albums
    pub async fn list_albums(&self) -> Response {
        self.client
            .get(format!("{}/albums", self.base_url))
            .send()
            .await
            .expect("List albums request failed")
    }

    /// GET /albums/{id}
    pub async fn get_album(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/albums/{}", self.base_url, id))
            .send()
            .await
            .expect("Get album request failed")
    }

    /// DELETE /albums/{id}
    pub async fn delete_album(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/albums/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete album request failed")
    }

    /// GET /albums/{id}/tracks
    pub async fn get_album_tracks(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/albums/{}/tracks", self.base_url, id))
            .send()
            .await
            .expect("Get album tracks request failed")
    }

    /// POST /albums/{id}/tracks
    pub async fn create_track(&self, album_id: &str, name: &str, duration: f64) -> Response {
        self.client
            .post(format!("{}/albums/{}/tracks", self.base_url, album_id))
            .json(&json!({ "name": name, "duration": duration }))
            .send()
            .await
            .expect("Create track request failed")
    }

    /// PUT /albums/{id}/play
    pub async fn play_album(&self, id: &str) -> Response {
        self.client
            .put(format!("{}/albums/{}/play", self.base_url, id))
            .send()
            .await
            .expect("Play album request failed")
    }

    // ========================================================================
    // Track Endpoints
    // ========================================================================

    /// GET /tracks
    pub async fn list_tracks(&self) -> Response {
        self.client
            .get(format!("{}/tracks", self.base_url))
            .send()
            .await
            .expect("List tracks request failed")
    }

    /// GET /tracks/{id}
    pub async fn get_track(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/tracks/{}", self.base_url, id))
            .send()
            .await
            .expect("Get track request failed")
    }

    /// DELETE /tracks/{id}
    pub async fn delete_track(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/tracks/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete track request failed")
    }

    /// PUT /tracks/{id}/play
    pub async fn play_track(&self, id: &str) -> Response {
        self.client
            .put(format!("{}/tracks/{}/play", self.base_url, id))
            .send()
            .await
            .expect("Play track request failed")
    }
}

use anyhow::Result;
use std::time::{Duration, Instant};

use crate::catalog_store::CreateOutcome;

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, state::*, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub artists: usize,
    pub albums: usize,
    pub tracks: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct CreateArtistBody {
    pub name: String,
    pub age: i64,
}

#[derive(Deserialize, Debug)]
struct CreateAlbumBody {
    pub name: String,
    pub genre: String,
}

#[derive(Deserialize, Debug)]
struct CreateTrackBody {
    pub name: String,
    pub duration: f64,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        artists: state.catalog_store.get_artists_count(),
        albums: state.catalog_store.get_albums_count(),
        tracks: state.catalog_store.get_tracks_count(),
    };
    Json(stats)
}

// =============================================================================
// Artist handlers
// =============================================================================

async fn get_artists(State(catalog_store): State<GuardedCatalogStore>) -> Response {
    match catalog_store.list_artists() {
        Ok(artists) => Json(artists).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn post_artist(
    State(catalog_store): State<GuardedCatalogStore>,
    body: Result<Json<CreateArtistBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(_) => return (StatusCode::BAD_REQUEST, "400: Invalid input").into_response(),
    };

    match catalog_store.create_artist(&body.name, body.age) {
        Ok(CreateOutcome::Created(artist)) => (StatusCode::CREATED, Json(artist)).into_response(),
        Ok(CreateOutcome::Conflict(existing)) => {
            (StatusCode::CONFLICT, Json(existing)).into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn get_artist(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog_store.get_artist(&id) {
        Ok(Some(artist)) => Json(artist).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "404: Artist not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn delete_artist(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog_store.delete_artist(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "404: Artist not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn get_artist_albums(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(artist_id): Path<String>,
) -> Response {
    match catalog_store.list_artist_albums(&artist_id) {
        Ok(Some(albums)) => Json(albums).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "404: Artist not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn post_artist_album(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(artist_id): Path<String>,
    body: Result<Json<CreateAlbumBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(_) => return (StatusCode::BAD_REQUEST, "400: Invalid input").into_response(),
    };

    match catalog_store.create_album(&artist_id, &body.name, &body.genre) {
        Ok(Some(CreateOutcome::Created(album))) => {
            (StatusCode::CREATED, Json(album)).into_response()
        }
        Ok(Some(CreateOutcome::Conflict(existing))) => {
            (StatusCode::CONFLICT, Json(existing)).into_response()
        }
        Ok(None) => (StatusCode::UNPROCESSABLE_ENTITY, "422: Artist not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn get_artist_tracks(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(artist_id): Path<String>,
) -> Response {
    match catalog_store.list_artist_tracks(&artist_id) {
        Ok(Some(tracks)) => Json(tracks).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "404: Artist not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn play_artist(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(artist_id): Path<String>,
) -> Response {
    match catalog_store.play_artist(&artist_id) {
        Ok(true) => "200: Artist played".into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "404: Artist not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

// =============================================================================
// Album handlers
// =============================================================================

async fn get_albums(State(catalog_store): State<GuardedCatalogStore>) -> Response {
    match catalog_store.list_albums() {
        Ok(albums) => Json(albums).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn get_album(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog_store.get_album(&id) {
        Ok(Some(album)) => Json(album).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "404: Album not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn delete_album(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog_store.delete_album(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "404: Album not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn get_album_tracks(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(album_id): Path<String>,
) -> Response {
    match catalog_store.list_album_tracks(&album_id) {
        Ok(Some(tracks)) => Json(tracks).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "404: Album not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn post_album_track(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(album_id): Path<String>,
    body: Result<Json<CreateTrackBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(_) => return (StatusCode::BAD_REQUEST, "400: Invalid input").into_response(),
    };

    match catalog_store.create_track(&album_id, &body.name, body.duration) {
        Ok(Some(CreateOutcome::Created(track))) => {
            (StatusCode::CREATED, Json(track)).into_response()
        }
        Ok(Some(CreateOutcome::Conflict(existing))) => {
            (StatusCode::CONFLICT, Json(existing)).into_response()
        }
        Ok(None) => (StatusCode::UNPROCESSABLE_ENTITY, "422: Album not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn play_album(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(album_id): Path<String>,
) -> Response {
    match catalog_store.play_album(&album_id) {
        Ok(true) => "200: Album played".into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "404: Album not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

// =============================================================================
// Track handlers
// =============================================================================

async fn get_tracks(State(catalog_store): State<GuardedCatalogStore>) -> Response {
    match catalog_store.list_tracks() {
        Ok(tracks) => Json(tracks).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn get_track(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog_store.get_track(&id) {
        Ok(Some(track)) => Json(track).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "404: Track not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn delete_track(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog_store.delete_track(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "404: Track not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn play_track(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog_store.play_track(&id) {
        Ok(true) => "200: Track played".into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "404: Track not found").into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

impl ServerState {
    fn new(config: ServerConfig, catalog_store: GuardedCatalogStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            catalog_store,
        }
    }
}

pub fn make_app(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Router {
    let state = ServerState::new(config, catalog_store);

    let artist_routes: Router = Router::new()
        .route("/artists", get(get_artists))
        .route("/artists", post(post_artist))
        .route("/artists/{id}", get(get_artist))
        .route("/artists/{id}", delete(delete_artist))
        .route("/artists/{id}/albums", get(get_artist_albums))
        .route("/artists/{id}/albums", post(post_artist_album))
        .route("/artists/{id}/tracks", get(get_artist_tracks))
        .route("/artists/{id}/albums/play", put(play_artist))
        .with_state(state.clone());

    let album_routes: Router = Router::new()
        .route("/albums", get(get_albums))
        .route("/albums/{id}", get(get_album))
        .route("/albums/{id}", delete(delete_album))
        .route("/albums/{id}/tracks", get(get_album_tracks))
        .route("/albums/{id}/tracks", post(post_album_track))
        .route("/albums/{id}/play", put(play_album))
        .with_state(state.clone());

    let track_routes: Router = Router::new()
        .route("/tracks", get(get_tracks))
        .route("/tracks/{id}", get(get_track))
        .route("/tracks/{id}", delete(delete_track))
        .route("/tracks/{id}/play", put(play_track))
        .with_state(state.clone());

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    home_router
        .merge(artist_routes)
        .merge(album_routes)
        .merge(track_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    catalog_store: GuardedCatalogStore,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
    };
    let app = make_app(config, catalog_store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}

//! Torrent record API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use torrentbay_core::{NewTorrent, Tags, Torrent, UpdateTorrent};

use super::{store_error_response, ErrorResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a single torrent record
#[derive(Debug, Serialize)]
pub struct TorrentResponse {
    pub id: u64,
    pub name: String,
    pub magnet: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    pub created_at: String,
    pub dead: bool,
}

impl From<Torrent> for TorrentResponse {
    fn from(torrent: Torrent) -> Self {
        Self {
            id: torrent.id,
            name: torrent.name,
            magnet: torrent.magnet,
            category: torrent.category,
            tags: torrent.tags,
            size: torrent.size,
            uploader: torrent.uploader,
            created_at: torrent.created_at.to_rfc3339(),
            dead: torrent.dead,
        }
    }
}

/// Response for listing torrents
#[derive(Debug, Serialize)]
pub struct ListTorrentsResponse {
    pub torrents: Vec<TorrentResponse>,
    pub total: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Add a new torrent record
pub async fn add_torrent(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewTorrent>,
) -> Result<(StatusCode, Json<TorrentResponse>), impl IntoResponse> {
    if body.name.trim().is_empty() || body.magnet.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "name and magnet are required".to_string(),
            }),
        ));
    }

    match state.store().add(body).await {
        Ok(torrent) => Ok((StatusCode::CREATED, Json(TorrentResponse::from(torrent)))),
        Err(e) => Err(store_error_response(e)),
    }
}

/// List all torrent records, newest first
pub async fn list_torrents(State(state): State<Arc<AppState>>) -> Json<ListTorrentsResponse> {
    let torrents = state.store().list_all().await;
    Json(ListTorrentsResponse {
        total: torrents.len(),
        torrents: torrents.into_iter().map(TorrentResponse::from).collect(),
    })
}

/// Apply a partial update to a torrent record
pub async fn update_torrent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<UpdateTorrent>,
) -> Result<Json<TorrentResponse>, impl IntoResponse> {
    match state.store().update(id, body).await {
        Ok(torrent) => Ok(Json(TorrentResponse::from(torrent))),
        Err(e) => Err(store_error_response(e)),
    }
}

//! Backup, export and import handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use torrentbay_core::backup_file_name;

use super::{store_error_response, ErrorResponse};
use crate::state::AppState;

/// Response for a completed import
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Records in the collection after the import
    pub count: usize,
}

/// Export the full document with export metadata, pretty-printed
pub async fn export_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    match state.store().export_snapshot().await {
        Ok(snapshot) => Ok((
            [(header::CONTENT_TYPE, "application/json")],
            snapshot,
        )),
        Err(e) => Err(store_error_response(e)),
    }
}

/// Download the raw persisted document as a backup file
pub async fn download_backup(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    match state.store().backup_document().await {
        Ok(Some(document)) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                backup_file_name(Utc::now())
            );
            Ok((
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document,
            ))
        }
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No data to export".to_string(),
            }),
        )),
        Err(e) => Err(store_error_response(e)),
    }
}

/// Import a snapshot: a full document replaces the collection, a bare record
/// array (legacy backups) appends to it
pub async fn import_snapshot(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ImportResponse>, impl IntoResponse> {
    match state.store().import_snapshot(&body).await {
        Ok(count) => Ok(Json(ImportResponse { count })),
        Err(e) => Err(store_error_response(e)),
    }
}

pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod routes;
pub mod torrents;
pub mod transfer;
pub mod view;

pub use routes::create_router;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use torrentbay_core::StoreError;

/// Error response body shared by all handlers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a store error onto an HTTP status and error body.
pub(crate) fn store_error_response(e: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
        StoreError::StorageFull(_) => StatusCode::INSUFFICIENT_STORAGE,
        StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

//! Notification feed handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use torrentbay_core::Notification;

use crate::state::AppState;

/// Maximum notifications returned per request
const MAX_LIMIT: usize = 200;

/// Default notifications returned per request
const DEFAULT_LIMIT: usize = 50;

/// Query parameters for the notification feed
#[derive(Debug, Deserialize)]
pub struct ListNotificationsParams {
    pub limit: Option<usize>,
}

/// Response for the notification feed, newest first
#[derive(Debug, Serialize)]
pub struct ListNotificationsResponse {
    pub notifications: Vec<Notification>,
}

/// Recent success/warning notifications
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListNotificationsParams>,
) -> Json<ListNotificationsResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    Json(ListNotificationsResponse {
        notifications: state.notifications().recent(limit).await,
    })
}

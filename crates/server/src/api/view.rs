//! View pipeline API handlers.
//!
//! The three view controls mirror the UI inputs: search text changes are
//! debounced by the pipeline, category and sort changes apply immediately.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use torrentbay_core::{DisplayList, SortMode, ViewControls};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for setting the search text
#[derive(Debug, Deserialize)]
pub struct SetSearchBody {
    pub text: String,
}

/// Request body for setting the category filter
#[derive(Debug, Deserialize)]
pub struct SetCategoryBody {
    /// `None` or empty string means "any"
    pub category: Option<String>,
}

/// Request body for setting the sort mode
#[derive(Debug, Deserialize)]
pub struct SetSortBody {
    pub sort: SortMode,
}

/// Current view control values
#[derive(Debug, Serialize)]
pub struct ControlsResponse {
    pub search: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub sort: SortMode,
}

impl From<ViewControls> for ControlsResponse {
    fn from(controls: ViewControls) -> Self {
        Self {
            search: controls.search,
            category: controls.category,
            sort: controls.sort,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// The current display list with counters
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<DisplayList> {
    Json(state.view().display().await)
}

/// Set the search text; the display list updates after the quiescence window
pub async fn set_search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetSearchBody>,
) -> (StatusCode, Json<ControlsResponse>) {
    state.view().set_search(body.text).await;
    let controls = state.view().controls().await;
    // Accepted, not applied: the recompute is pending behind the debounce.
    (StatusCode::ACCEPTED, Json(ControlsResponse::from(controls)))
}

/// Set the category filter; recomputes immediately
pub async fn set_category(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetCategoryBody>,
) -> Json<ControlsResponse> {
    state.view().set_category(body.category).await;
    Json(ControlsResponse::from(state.view().controls().await))
}

/// Set the sort mode; recomputes immediately
pub async fn set_sort(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetSortBody>,
) -> Json<ControlsResponse> {
    state.view().set_sort(body.sort).await;
    Json(ControlsResponse::from(state.view().controls().await))
}

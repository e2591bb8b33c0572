use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::middleware::metrics_middleware;
use super::{handlers, notifications, torrents, transfer, view};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health, config, metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Torrent records
        .route("/torrents", post(torrents::add_torrent))
        .route("/torrents", get(torrents::list_torrents))
        .route("/torrents/{id}", patch(torrents::update_torrent))
        // View pipeline
        .route("/view", get(view::get_view))
        .route("/view/search", put(view::set_search))
        .route("/view/category", put(view::set_category))
        .route("/view/sort", put(view::set_sort))
        // Backup / restore
        .route("/export", get(transfer::export_snapshot))
        .route("/backup", get(transfer::download_backup))
        .route("/import", post(transfer::import_snapshot))
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .layer(middleware::from_fn(metrics_middleware))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
}

//! Common test utilities for API testing.
//!
//! Provides a test fixture that builds an in-process router over a store
//! backed by a temp-dir JSON document, so tests exercise the real
//! persistence path without a running server.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use torrentbay_core::{
    create_notifier, Config, FileBackend, NotificationLog, StorageConfig, TorrentStore,
    ViewPipeline,
};
use torrentbay_server::{create_router, AppState};

/// Test fixture wrapping an in-process router.
///
/// The view pipeline's periodic refresh loop is not started; tests trigger
/// recomputes through the control endpoints, which keeps timing
/// deterministic.
pub struct TestFixture {
    /// The axum router for testing
    pub router: Router,
    /// Direct handle to the store behind the API
    pub store: Arc<TorrentStore>,
    /// The notification feed behind GET /notifications
    pub notifications: Arc<NotificationLog>,
    /// Temp directory holding the JSON document
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
    pub headers: axum::http::HeaderMap,
}

impl TestFixture {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let doc_path = temp_dir.path().join("test.json");

        let config = Config {
            storage: StorageConfig {
                path: doc_path.clone(),
            },
            ..Default::default()
        };

        let notifications = Arc::new(NotificationLog::new(100));
        let (notify_handle, notify_writer) = create_notifier(Arc::clone(&notifications), 100);
        tokio::spawn(notify_writer.run());

        let store = Arc::new(TorrentStore::new(FileBackend::new(doc_path)).with_notify(notify_handle));
        store.init().await;

        let view = ViewPipeline::new(Arc::clone(&store), config.view.clone());

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&store),
            view,
            Arc::clone(&notifications),
        ));

        Self {
            router: create_router(state),
            store,
            notifications,
            temp_dir,
        }
    }

    async fn request(&self, method: Method, path: &str, body: Body, json: bool) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if json {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            text,
            headers,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, Body::empty(), false).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Body::from(body.to_string()), true)
            .await
    }

    pub async fn post_text(&self, path: &str, body: String) -> TestResponse {
        self.request(Method::POST, path, Body::from(body), false)
            .await
    }

    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, path, Body::from(body.to_string()), true)
            .await
    }

    pub async fn patch(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, path, Body::from(body.to_string()), true)
            .await
    }
}

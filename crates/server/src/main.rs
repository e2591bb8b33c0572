use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use torrentbay_core::{
    create_notifier, load_config, validate_config, Config, FileBackend, NotificationLog,
    TorrentStore, ViewPipeline,
};

use torrentbay_server::{create_router, AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Capacity of the retained notification feed
const NOTIFICATION_LOG_SIZE: usize = 100;

/// Buffer size for the notification channel
const NOTIFY_BUFFER_SIZE: usize = 1000;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("TorrentBay {}", VERSION);

    // Determine config path
    let config_path = std::env::var("TORRENTBAY_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration; a local-first tool runs fine on defaults
    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!("No config file at {:?}, using defaults", config_path);
        Config::default()
    };

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Document path: {:?}", config.storage.path);

    // Create notification system
    let notifications = Arc::new(NotificationLog::new(NOTIFICATION_LOG_SIZE));
    let (notify_handle, notify_writer) =
        create_notifier(Arc::clone(&notifications), NOTIFY_BUFFER_SIZE);

    // Spawn notification writer task
    let writer_handle = tokio::spawn(notify_writer.run());

    // Create the store over the single JSON document and load it eagerly
    let store = Arc::new(
        TorrentStore::new(FileBackend::new(&config.storage.path))
            .with_notify(notify_handle.clone()),
    );
    store.init().await;
    info!("Store initialized: {} torrents", store.count().await);

    // Create and start the view pipeline
    let view = ViewPipeline::new(Arc::clone(&store), config.view.clone());
    view.start().await;

    // Create app state
    let app_state = Arc::new(AppState::new(
        config.clone(),
        store,
        view.clone(),
        notifications,
    ));

    // Create router
    let app = create_router(app_state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop the view pipeline (discards pending debounce timers)
    info!("Server shutting down...");
    view.stop().await;

    // Drop all holders of NotifyHandle so the writer's channel closes.
    // The store holds a clone, and the view holds the store; both must go.
    // AppState was moved into the server and is already dropped.
    drop(view);
    drop(notify_handle);

    // Wait for the writer to finish processing remaining events
    let _ = writer_handle.await;
    info!("Notification writer stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

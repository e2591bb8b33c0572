use std::sync::Arc;
use torrentbay_core::{Config, NotificationLog, SanitizedConfig, TorrentStore, ViewPipeline};

/// Shared application state
pub struct AppState {
    config: Config,
    store: Arc<TorrentStore>,
    view: ViewPipeline,
    notifications: Arc<NotificationLog>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<TorrentStore>,
        view: ViewPipeline,
        notifications: Arc<NotificationLog>,
    ) -> Self {
        Self {
            config,
            store,
            view,
            notifications,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn store(&self) -> &TorrentStore {
        self.store.as_ref()
    }

    pub fn view(&self) -> &ViewPipeline {
        &self.view
    }

    pub fn notifications(&self) -> &NotificationLog {
        self.notifications.as_ref()
    }
}

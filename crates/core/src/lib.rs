pub mod config;
pub mod metrics;
pub mod notify;
pub mod store;
pub mod view;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig, StorageConfig, ViewConfig,
};
pub use notify::{
    create_notifier, Notification, NotificationLog, NotifyEvent, NotifyHandle, NotifyWriter,
    Severity,
};
pub use store::{
    backup_file_name, FileBackend, MemoryBackend, NewTorrent, StorageBackend, StoreError, Tags,
    Torrent, TorrentStore, UpdateTorrent,
};
pub use view::{
    DisplayEntry, DisplayList, RefreshTrigger, SortMode, ViewControls, ViewPipeline,
};

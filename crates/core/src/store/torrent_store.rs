//! The magnet catalog store.
//!
//! Owns the record collection and the id counter, persisted wholesale as one
//! JSON document on every mutation. Initialization is lazy and idempotent:
//! however many operations race in before the first load finishes, exactly
//! one load runs and all callers await it.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::{OnceCell, RwLock};
use tracing::{info, warn};

use crate::metrics;
use crate::notify::{NotifyEvent, NotifyHandle};

use super::backend::StorageBackend;
use super::document::{parse_import, Document, ExportDocument, ImportPayload};
use super::types::{NewTorrent, Torrent, UpdateTorrent};
use super::StoreError;

/// File name for a backup download taken on `date`.
pub fn backup_file_name(date: DateTime<Utc>) -> String {
    format!("torrentbay-backup-{}.json", date.format("%Y-%m-%d"))
}

struct CollectionState {
    torrents: Vec<Torrent>,
    next_id: u64,
}

impl CollectionState {
    fn empty() -> Self {
        Self {
            torrents: Vec::new(),
            next_id: 1,
        }
    }
}

/// Durable store for the whole magnet collection.
pub struct TorrentStore {
    backend: Box<dyn StorageBackend>,
    state: RwLock<CollectionState>,
    init: OnceCell<()>,
    notify: Option<NotifyHandle>,
}

impl TorrentStore {
    /// Create a store over `backend`. Nothing is loaded until the first
    /// operation (or an explicit [`TorrentStore::init`]).
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            state: RwLock::new(CollectionState::empty()),
            init: OnceCell::new(),
            notify: None,
        }
    }

    /// Attach a notification handle; store operations will emit
    /// success/warning events through it.
    pub fn with_notify(mut self, notify: NotifyHandle) -> Self {
        self.notify = Some(notify);
        self
    }

    /// Whether initialization has completed.
    pub fn is_ready(&self) -> bool {
        self.init.initialized()
    }

    /// Eagerly run initialization. Equivalent to the implicit init every
    /// operation performs; calling it again is a no-op.
    pub async fn init(&self) {
        self.ensure_ready().await;
    }

    /// Run the one-time lazy initialization, or wait for the in-flight one.
    ///
    /// Read or parse failures degrade to an empty collection; they are logged
    /// and never surfaced. The previously stored blob is left untouched in
    /// that case.
    async fn ensure_ready(&self) {
        self.init
            .get_or_init(|| async {
                match self.backend.load().await {
                    Ok(Some(blob)) => match serde_json::from_str::<Document>(&blob) {
                        Ok(document) => {
                            let mut state = self.state.write().await;
                            state.torrents = document.torrents;
                            state.next_id = document.next_id;
                            info!(
                                "Local database initialized: {} torrents loaded",
                                state.torrents.len()
                            );
                        }
                        Err(e) => {
                            warn!("Stored document is corrupt, starting empty: {}", e);
                        }
                    },
                    Ok(None) => {
                        // First run: persist the empty document right away.
                        let state = self.state.read().await;
                        if let Err(e) = self.persist(&state).await {
                            warn!("Failed to persist initial empty database: {}", e);
                        } else {
                            info!("Local database initialized: empty");
                        }
                    }
                    Err(e) => {
                        warn!("Storage unavailable, starting empty: {}", e);
                    }
                }
            })
            .await;
    }

    /// Serialize the current collection and rewrite the whole document.
    async fn persist(&self, state: &CollectionState) -> Result<(), StoreError> {
        let document = Document::new(state.torrents.clone(), state.next_id);
        let json =
            serde_json::to_string(&document).map_err(|e| StoreError::Storage(e.to_string()))?;

        let start = Instant::now();
        let result = self.backend.store(&json).await;
        metrics::DOCUMENT_SAVE_DURATION.observe(start.elapsed().as_secs_f64());

        if let Err(e) = &result {
            metrics::DOCUMENT_SAVE_FAILURES.inc();
            if let (StoreError::StorageFull(detail), Some(notify)) = (e, &self.notify) {
                notify.try_emit(NotifyEvent::StorageFull {
                    detail: detail.clone(),
                });
            }
        }
        result
    }

    /// Add a record: assigns the next id, stamps `created_at`, persists.
    pub async fn add(&self, new: NewTorrent) -> Result<Torrent, StoreError> {
        self.ensure_ready().await;

        let mut state = self.state.write().await;
        let torrent = Torrent {
            id: state.next_id,
            name: new.name,
            magnet: new.magnet,
            category: new.category,
            tags: new.tags,
            size: new.size,
            uploader: new.uploader,
            created_at: Utc::now(),
            dead: false,
        };
        state.next_id += 1;
        state.torrents.push(torrent.clone());

        if let Err(e) = self.persist(&state).await {
            // Keep memory consistent with the (unchanged) stored blob.
            state.torrents.pop();
            state.next_id -= 1;
            return Err(e);
        }

        metrics::TORRENTS_ADDED.inc();
        if let Some(notify) = &self.notify {
            notify.try_emit(NotifyEvent::TorrentAdded {
                id: torrent.id,
                name: torrent.name.clone(),
            });
        }
        Ok(torrent)
    }

    /// All records, newest first; ties keep insertion order.
    pub async fn list_all(&self) -> Vec<Torrent> {
        self.ensure_ready().await;

        let state = self.state.read().await;
        let mut torrents = state.torrents.clone();
        // Stable sort: equal timestamps stay in insertion order.
        torrents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        torrents
    }

    /// Apply a partial update to the record with `id`.
    pub async fn update(&self, id: u64, update: UpdateTorrent) -> Result<Torrent, StoreError> {
        self.ensure_ready().await;

        let mut state = self.state.write().await;
        let index = state
            .torrents
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let original = state.torrents[index].clone();
        update.apply(&mut state.torrents[index]);

        if let Err(e) = self.persist(&state).await {
            state.torrents[index] = original;
            return Err(e);
        }

        metrics::TORRENTS_UPDATED.inc();
        if let Some(notify) = &self.notify {
            notify.try_emit(NotifyEvent::TorrentUpdated { id });
        }
        Ok(state.torrents[index].clone())
    }

    /// Number of records currently held.
    pub async fn count(&self) -> usize {
        self.ensure_ready().await;
        self.state.read().await.torrents.len()
    }

    /// Full document plus export metadata, pretty-printed.
    pub async fn export_snapshot(&self) -> Result<String, StoreError> {
        self.ensure_ready().await;

        let state = self.state.read().await;
        let export = ExportDocument::new(state.torrents.clone(), state.next_id);
        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        metrics::EXPORTS_TOTAL.inc();
        if let Some(notify) = &self.notify {
            notify.try_emit(NotifyEvent::BackupExported {
                torrents: state.torrents.len(),
            });
        }
        Ok(json)
    }

    /// Import a snapshot: a bare array appends (legacy backups), the document
    /// shape replaces the collection wholesale. Returns the resulting count.
    pub async fn import_snapshot(&self, json: &str) -> Result<usize, StoreError> {
        self.ensure_ready().await;

        let payload = parse_import(json)?;

        let mut state = self.state.write().await;
        let previous = CollectionState {
            torrents: state.torrents.clone(),
            next_id: state.next_id,
        };

        let shape = match payload {
            ImportPayload::Legacy(imported) => {
                state.torrents.extend(imported);
                state.next_id = state.torrents.iter().map(|t| t.id).max().unwrap_or(0) + 1;
                "legacy"
            }
            ImportPayload::Full { torrents, next_id } => {
                state.torrents = torrents;
                state.next_id = next_id;
                "full"
            }
        };

        if let Err(e) = self.persist(&state).await {
            *state = previous;
            return Err(e);
        }

        metrics::IMPORTS_TOTAL.with_label_values(&[shape]).inc();
        let count = state.torrents.len();
        if let Some(notify) = &self.notify {
            notify.try_emit(NotifyEvent::ImportCompleted { count });
        }
        Ok(count)
    }

    /// The raw persisted blob, for backup downloads. `None` if nothing has
    /// been stored yet.
    pub async fn backup_document(&self) -> Result<Option<String>, StoreError> {
        self.ensure_ready().await;
        self.backend.load().await
    }
}

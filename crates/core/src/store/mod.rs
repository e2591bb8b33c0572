//! The Store: durable CRUD-lite over a single record collection, serialized
//! as one JSON document under one storage location.

mod backend;
mod document;
mod torrent_store;
mod types;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use document::{Document, ExportDocument, ImportPayload, EXPORT_FORMAT_VERSION};
pub use torrent_store::{backup_file_name, TorrentStore};
pub use types::{NewTorrent, Tags, Torrent, UpdateTorrent};

use thiserror::Error;

/// Error type for store operations.
///
/// Initialization and read failures never surface here; they degrade to an
/// empty in-memory collection. Only user-initiated mutations propagate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id.
    #[error("Torrent not found: {0}")]
    NotFound(u64),

    /// Import payload is not parseable JSON.
    #[error("Invalid JSON format: {0}")]
    InvalidFormat(String),

    /// The write failed for lack of space; the previous document is intact.
    #[error("Storage quota exceeded ({0}). Try exporting and clearing old data.")]
    StorageFull(String),

    /// Any other storage failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

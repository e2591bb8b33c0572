//! Storage backends for the persisted document.
//!
//! A backend holds exactly one blob. Writes must be atomic set-or-fail:
//! a failed `store` leaves the previously stored blob intact.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::StoreError;

/// Storage seam for the single-document collection.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the stored blob, `None` if nothing has been stored yet.
    async fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored blob atomically.
    async fn store(&self, document: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<T> {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load().await
    }

    async fn store(&self, document: &str) -> Result<(), StoreError> {
        (**self).store(document).await
    }
}

/// File-backed storage: one JSON file on disk.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp path used for write-then-rename.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn map_write_error(e: io::Error) -> StoreError {
        match e.kind() {
            io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => {
                StoreError::StorageFull(e.to_string())
            }
            _ => StoreError::Storage(e.to_string()),
        }
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Storage(e.to_string())),
        }
    }

    async fn store(&self, document: &str) -> Result<(), StoreError> {
        // Write a sibling temp file and rename it over the target. The old
        // blob stays valid until the rename; never truncate-then-write.
        let temp = self.temp_path();

        if let Err(e) = tokio::fs::write(&temp, document).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(Self::map_write_error(e));
        }

        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(Self::map_write_error)
    }
}

/// In-memory storage, for tests.
#[derive(Default)]
pub struct MemoryBackend {
    blob: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out with a stored blob, as if a previous session had saved it.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(contents.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent writes fail with `StorageFull`, emulating quota
    /// exhaustion.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The currently stored blob.
    pub fn contents(&self) -> Option<String> {
        self.blob.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.lock().unwrap().clone())
    }

    async fn store(&self, document: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::StorageFull("simulated quota".to_string()));
        }
        *self.blob.lock().unwrap() = Some(document.to_string());
        Ok(())
    }
}

//! Persisted document shapes.
//!
//! The whole collection is one JSON document under one storage location:
//!
//! ```json
//! { "torrents": [...], "nextId": 7, "lastModified": "2024-01-01T00:00:00Z" }
//! ```
//!
//! Exports carry the same shape plus `exportDate` and a `version` tag.
//! Imports accept either the document shape or a bare array of records
//! (the legacy backup format).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::Torrent;
use super::StoreError;

/// Version tag written into exports.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// The persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub torrents: Vec<Torrent>,
    #[serde(default = "default_next_id")]
    pub next_id: u64,
    pub last_modified: DateTime<Utc>,
}

fn default_next_id() -> u64 {
    1
}

impl Document {
    /// A fresh document around the current collection state.
    pub fn new(torrents: Vec<Torrent>, next_id: u64) -> Self {
        Self {
            torrents,
            next_id,
            last_modified: Utc::now(),
        }
    }
}

/// An export: the document plus provenance metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub torrents: Vec<Torrent>,
    pub next_id: u64,
    pub export_date: DateTime<Utc>,
    pub version: &'static str,
}

impl ExportDocument {
    pub fn new(torrents: Vec<Torrent>, next_id: u64) -> Self {
        Self {
            torrents,
            next_id,
            export_date: Utc::now(),
            version: EXPORT_FORMAT_VERSION,
        }
    }
}

/// A parsed import payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportPayload {
    /// Legacy backup: a bare array of records. Appended to existing data.
    Legacy(Vec<Torrent>),
    /// Document shape: replaces the collection wholesale.
    Full { torrents: Vec<Torrent>, next_id: u64 },
}

/// Parse an import payload.
///
/// Only unparseable JSON is an error. Any parseable value that is not an
/// array is treated as the document shape, with missing fields defaulting
/// to an empty list / counter 1 — the leniency the legacy client had.
pub fn parse_import(json: &str) -> Result<ImportPayload, StoreError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| StoreError::InvalidFormat(e.to_string()))?;

    if value.is_array() {
        let torrents: Vec<Torrent> = serde_json::from_value(value)
            .map_err(|e| StoreError::InvalidFormat(e.to_string()))?;
        return Ok(ImportPayload::Legacy(torrents));
    }

    let torrents: Vec<Torrent> = value
        .get("torrents")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| StoreError::InvalidFormat(e.to_string()))?
        .unwrap_or_default();

    let next_id = value
        .get("nextId")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(1);

    Ok(ImportPayload::Full { torrents, next_id })
}

//! Derived display types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::Torrent;

use super::sort::SortMode;

/// The three user-controlled inputs of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct ViewControls {
    /// Raw search text as typed; normalization happens in the filter.
    pub search: String,
    /// Selected category, `None` for "any".
    pub category: Option<String>,
    /// Sort order.
    pub sort: SortMode,
}

/// One record as shown to the user, display defaults applied.
///
/// All optional-field defaulting lives here and nowhere else.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayEntry {
    pub id: u64,
    pub name: String,
    pub magnet: String,
    pub category: String,
    pub tags: Vec<String>,
    pub size: String,
    pub uploader: String,
    pub created_at: DateTime<Utc>,
    pub dead: bool,
}

impl From<&Torrent> for DisplayEntry {
    fn from(torrent: &Torrent) -> Self {
        Self {
            id: torrent.id,
            name: torrent.name.clone(),
            magnet: torrent.magnet.clone(),
            category: torrent.category.clone(),
            tags: torrent.tags.as_ref().map(|t| t.to_list()).unwrap_or_default(),
            size: torrent.size.clone().unwrap_or_else(|| "Unknown".to_string()),
            uploader: torrent
                .uploader
                .clone()
                .unwrap_or_else(|| "Anonymous".to_string()),
            created_at: torrent.created_at,
            dead: torrent.dead,
        }
    }
}

/// The filtered, sorted list currently shown, plus its counters.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayList {
    pub entries: Vec<DisplayEntry>,
    /// Records in the store, regardless of filter.
    pub total: usize,
    /// Records passing the filter (same as `entries.len()`).
    pub filtered: usize,
    pub last_refreshed: DateTime<Utc>,
}

impl DisplayList {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            total: 0,
            filtered: 0,
            last_refreshed: Utc::now(),
        }
    }
}

//! Core record types for the magnet catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tags attached to a record.
///
/// Older documents store tags as one comma-separated string, newer ones as a
/// list. Both shapes are accepted and preserved as given; use [`Tags::to_list`]
/// or [`Tags::joined`] when the shape matters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Tags {
    /// Comma-separated string, e.g. `"linux, iso"`.
    Csv(String),
    /// Ordered list of tag strings.
    List(Vec<String>),
}

impl Tags {
    /// All tags as a trimmed list, empty entries dropped.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Tags::Csv(s) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            Tags::List(l) => l.iter().map(|t| t.trim().to_string()).collect(),
        }
    }

    /// All tags joined into one string, for substring matching.
    pub fn joined(&self) -> String {
        match self {
            Tags::Csv(s) => s.clone(),
            Tags::List(l) => l.join(","),
        }
    }
}

impl From<&str> for Tags {
    fn from(s: &str) -> Self {
        Tags::Csv(s.to_string())
    }
}

/// A magnet-link record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Torrent {
    /// Unique positive integer, assigned by the store, never reused.
    pub id: u64,

    /// Display title.
    pub name: String,

    /// Magnet URI.
    pub magnet: String,

    /// Category label.
    pub category: String,

    /// Optional tags (comma-separated string or list).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,

    /// Optional human-readable size string, e.g. "1.2 GB".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Optional uploader name; display falls back to "Anonymous".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,

    /// Set at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,

    /// Liveness flag, mutable.
    #[serde(default)]
    pub dead: bool,
}

/// Fields supplied when adding a record.
///
/// `id`, `created_at` and `dead` are owned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTorrent {
    pub name: String,
    pub magnet: String,
    pub category: String,
    #[serde(default)]
    pub tags: Option<Tags>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
}

impl NewTorrent {
    /// Create a request with the required fields.
    pub fn new(
        name: impl Into<String>,
        magnet: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            magnet: magnet.into(),
            category: category.into(),
            tags: None,
            size: None,
            uploader: None,
        }
    }

    /// Attach tags.
    pub fn with_tags(mut self, tags: impl Into<Tags>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Attach a human-readable size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Attach an uploader name.
    pub fn with_uploader(mut self, uploader: impl Into<String>) -> Self {
        self.uploader = Some(uploader.into());
        self
    }
}

/// Partial update for a record; `None` fields are left untouched.
///
/// `id` and `created_at` are immutable and have no counterpart here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTorrent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub magnet: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Tags>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub dead: Option<bool>,
}

impl UpdateTorrent {
    /// An update touching nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the record dead (or alive again).
    pub fn with_dead(mut self, dead: bool) -> Self {
        self.dead = Some(dead);
        self
    }

    /// Rename the record.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Shallow field replacement over `torrent`.
    pub fn apply(self, torrent: &mut Torrent) {
        if let Some(name) = self.name {
            torrent.name = name;
        }
        if let Some(magnet) = self.magnet {
            torrent.magnet = magnet;
        }
        if let Some(category) = self.category {
            torrent.category = category;
        }
        if let Some(tags) = self.tags {
            torrent.tags = Some(tags);
        }
        if let Some(size) = self.size {
            torrent.size = Some(size);
        }
        if let Some(uploader) = self.uploader {
            torrent.uploader = Some(uploader);
        }
        if let Some(dead) = self.dead {
            torrent.dead = dead;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_torrent() -> Torrent {
        Torrent {
            id: 1,
            name: "Ubuntu 24.04 ISO".to_string(),
            magnet: "magnet:?xt=urn:btih:abc".to_string(),
            category: "software".to_string(),
            tags: Some(Tags::Csv("linux, iso".to_string())),
            size: Some("5.8 GB".to_string()),
            uploader: None,
            created_at: Utc::now(),
            dead: false,
        }
    }

    #[test]
    fn test_tags_csv_to_list() {
        let tags = Tags::Csv("linux, iso, ,x86".to_string());
        assert_eq!(tags.to_list(), vec!["linux", "iso", "x86"]);
    }

    #[test]
    fn test_tags_list_to_list() {
        let tags = Tags::List(vec!["a".to_string(), " b ".to_string()]);
        assert_eq!(tags.to_list(), vec!["a", "b"]);
    }

    #[test]
    fn test_tags_deserialize_both_shapes() {
        let csv: Tags = serde_json::from_str(r#""linux, iso""#).unwrap();
        assert_eq!(csv, Tags::Csv("linux, iso".to_string()));

        let list: Tags = serde_json::from_str(r#"["linux", "iso"]"#).unwrap();
        assert_eq!(list, Tags::List(vec!["linux".to_string(), "iso".to_string()]));
    }

    #[test]
    fn test_torrent_serialization_field_names() {
        let torrent = sample_torrent();
        let json = serde_json::to_string(&torrent).unwrap();
        assert!(json.contains("\"created_at\""));
        assert!(json.contains("\"magnet\""));
        assert!(json.contains("\"dead\":false"));

        let back: Torrent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, torrent);
    }

    #[test]
    fn test_torrent_optional_fields_skipped() {
        let torrent = Torrent {
            tags: None,
            size: None,
            uploader: None,
            ..sample_torrent()
        };
        let json = serde_json::to_string(&torrent).unwrap();
        assert!(!json.contains("tags"));
        assert!(!json.contains("size"));
        assert!(!json.contains("uploader"));
    }

    #[test]
    fn test_torrent_missing_dead_defaults_false() {
        let json = r#"{
            "id": 3,
            "name": "x",
            "magnet": "magnet:?xt=urn:btih:x",
            "category": "other",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let torrent: Torrent = serde_json::from_str(json).unwrap();
        assert!(!torrent.dead);
        assert!(torrent.tags.is_none());
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let mut torrent = sample_torrent();
        let created_at = torrent.created_at;

        UpdateTorrent::new().with_dead(true).apply(&mut torrent);

        assert!(torrent.dead);
        assert_eq!(torrent.name, "Ubuntu 24.04 ISO");
        assert_eq!(torrent.category, "software");
        assert_eq!(torrent.created_at, created_at);
    }

    #[test]
    fn test_update_replaces_multiple_fields() {
        let mut torrent = sample_torrent();

        let update = UpdateTorrent {
            name: Some("renamed".to_string()),
            uploader: Some("alice".to_string()),
            ..Default::default()
        };
        update.apply(&mut torrent);

        assert_eq!(torrent.name, "renamed");
        assert_eq!(torrent.uploader.as_deref(), Some("alice"));
        assert!(!torrent.dead);
    }

    #[test]
    fn test_new_torrent_builder() {
        let new = NewTorrent::new("n", "magnet:?", "video")
            .with_tags("a,b")
            .with_size("700 MB")
            .with_uploader("bob");
        assert_eq!(new.name, "n");
        assert_eq!(new.tags, Some(Tags::Csv("a,b".to_string())));
        assert_eq!(new.size.as_deref(), Some("700 MB"));
        assert_eq!(new.uploader.as_deref(), Some("bob"));
    }
}

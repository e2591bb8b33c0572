//! Display list sort orders.

use serde::{Deserialize, Serialize};

use crate::store::Torrent;

use super::size::parse_size_to_bytes;

/// Sort order for the display list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// `created_at` descending.
    #[default]
    Newest,
    /// Name ascending, case-insensitive.
    Name,
    /// Parsed byte size descending.
    Size,
}

impl SortMode {
    /// Returns the mode as a string (for query params and metrics).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Name => "name",
            SortMode::Size => "size",
        }
    }
}

/// Sort `torrents` in place by `mode`. All orders are stable.
pub fn sort_torrents(torrents: &mut [Torrent], mode: SortMode) {
    match mode {
        SortMode::Newest => {
            torrents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        SortMode::Name => {
            // Case-insensitive ordering, raw name as tiebreak.
            torrents.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
        SortMode::Size => {
            torrents.sort_by(|a, b| {
                let a_bytes = parse_size_to_bytes(a.size.as_deref().unwrap_or("0"));
                let b_bytes = parse_size_to_bytes(b.size.as_deref().unwrap_or("0"));
                b_bytes.total_cmp(&a_bytes)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn torrent(name: &str, size: Option<&str>, age_mins: i64) -> Torrent {
        Torrent {
            id: 0,
            name: name.to_string(),
            magnet: "magnet:?xt=urn:btih:t".to_string(),
            category: "other".to_string(),
            tags: None,
            size: size.map(str::to_string),
            uploader: None,
            created_at: Utc::now() - Duration::minutes(age_mins),
            dead: false,
        }
    }

    fn names(torrents: &[Torrent]) -> Vec<&str> {
        torrents.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_newest_sorts_descending_by_created_at() {
        let mut torrents = vec![
            torrent("old", None, 30),
            torrent("newest", None, 0),
            torrent("middle", None, 10),
        ];
        sort_torrents(&mut torrents, SortMode::Newest);
        assert_eq!(names(&torrents), vec!["newest", "middle", "old"]);
    }

    #[test]
    fn test_name_sorts_ascending_case_insensitive() {
        let mut torrents = vec![
            torrent("banana", None, 0),
            torrent("Apple", None, 0),
            torrent("cherry", None, 0),
        ];
        sort_torrents(&mut torrents, SortMode::Name);
        assert_eq!(names(&torrents), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_size_sorts_descending_by_parsed_bytes() {
        let mut torrents = vec![
            torrent("small", Some("700 MB"), 0),
            torrent("large", Some("1.5 GB"), 0),
            torrent("unknown", None, 0),
            torrent("tiny", Some("12 KB"), 0),
        ];
        sort_torrents(&mut torrents, SortMode::Size);
        assert_eq!(names(&torrents), vec!["large", "small", "tiny", "unknown"]);
    }

    #[test]
    fn test_size_unitless_treated_as_megabytes() {
        let mut torrents = vec![
            torrent("explicit", Some("9 MB"), 0),
            torrent("bare", Some("10"), 0),
        ];
        sort_torrents(&mut torrents, SortMode::Size);
        assert_eq!(names(&torrents), vec!["bare", "explicit"]);
    }

    #[test]
    fn test_sort_mode_serde_round_trip() {
        let json = serde_json::to_string(&SortMode::Newest).unwrap();
        assert_eq!(json, "\"newest\"");
        let mode: SortMode = serde_json::from_str("\"size\"").unwrap();
        assert_eq!(mode, SortMode::Size);
    }
}

use serde::Serialize;

/// Severity of a notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
}

/// Notification event types
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifyEvent {
    // Record lifecycle
    TorrentAdded {
        id: u64,
        name: String,
    },
    TorrentUpdated {
        id: u64,
    },

    // Backup / restore
    ImportCompleted {
        count: usize,
    },
    BackupExported {
        torrents: usize,
    },

    // Storage trouble
    StorageFull {
        detail: String,
    },
}

impl NotifyEvent {
    /// Returns the event type as a string (for filtering).
    pub fn event_type(&self) -> &'static str {
        match self {
            NotifyEvent::TorrentAdded { .. } => "torrent_added",
            NotifyEvent::TorrentUpdated { .. } => "torrent_updated",
            NotifyEvent::ImportCompleted { .. } => "import_completed",
            NotifyEvent::BackupExported { .. } => "backup_exported",
            NotifyEvent::StorageFull { .. } => "storage_full",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            NotifyEvent::StorageFull { .. } => Severity::Warning,
            _ => Severity::Success,
        }
    }

    /// User-facing banner text.
    pub fn message(&self) -> String {
        match self {
            NotifyEvent::TorrentAdded { name, .. } => {
                format!("Added \"{}\"", name)
            }
            NotifyEvent::TorrentUpdated { id } => format!("Updated torrent #{}", id),
            NotifyEvent::ImportCompleted { count } => {
                format!("Import complete: {} torrents in database", count)
            }
            NotifyEvent::BackupExported { torrents } => {
                format!("Exported {} torrents", torrents)
            }
            NotifyEvent::StorageFull { .. } => {
                "Storage quota exceeded. Try exporting and clearing old data.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        let added = NotifyEvent::TorrentAdded {
            id: 1,
            name: "x".to_string(),
        };
        assert_eq!(added.event_type(), "torrent_added");
        assert_eq!(added.severity(), Severity::Success);

        let full = NotifyEvent::StorageFull {
            detail: "disk full".to_string(),
        };
        assert_eq!(full.event_type(), "storage_full");
        assert_eq!(full.severity(), Severity::Warning);
    }

    #[test]
    fn test_messages_are_user_facing() {
        let event = NotifyEvent::TorrentAdded {
            id: 7,
            name: "Ubuntu ISO".to_string(),
        };
        assert_eq!(event.message(), "Added \"Ubuntu ISO\"");

        let full = NotifyEvent::StorageFull {
            detail: "ENOSPC".to_string(),
        };
        assert!(full.message().contains("exporting"));
    }

    #[test]
    fn test_serialization_tags_events() {
        let event = NotifyEvent::ImportCompleted { count: 3 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"import_completed","count":3}"#);
    }
}

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::RwLock;

use super::{NotifyEnvelope, NotifyEvent, NotifyHandle, Severity};

/// A notification as exposed to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub event: NotifyEvent,
}

/// Bounded in-memory log of recent notifications, newest last.
pub struct NotificationLog {
    capacity: usize,
    entries: RwLock<VecDeque<Notification>>,
}

impl NotificationLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub async fn push(&self, notification: Notification) {
        let mut entries = self.entries.write().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(notification);
    }

    /// The most recent notifications, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<Notification> {
        let entries = self.entries.read().await;
        entries.iter().rev().take(limit).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Background task that collects notification events into the log
pub struct NotifyWriter {
    rx: mpsc::Receiver<NotifyEnvelope>,
    log: Arc<NotificationLog>,
}

impl NotifyWriter {
    pub fn new(rx: mpsc::Receiver<NotifyEnvelope>, log: Arc<NotificationLog>) -> Self {
        Self { rx, log }
    }

    /// Run the writer, consuming events until the channel is closed
    ///
    /// This should be spawned as a background task.
    pub async fn run(mut self) {
        tracing::info!("Notification writer started");

        while let Some(envelope) = self.rx.recv().await {
            let notification = Notification {
                timestamp: envelope.timestamp,
                severity: envelope.event.severity(),
                message: envelope.event.message(),
                event: envelope.event,
            };

            match notification.severity {
                Severity::Success => tracing::info!("{}", notification.message),
                Severity::Warning => tracing::warn!("{}", notification.message),
            }

            self.log.push(notification).await;
        }

        tracing::info!("Notification writer shutting down");
    }
}

/// Create a complete notification system
///
/// Returns:
/// - `NotifyHandle` - for emitting events (clone this to share across tasks)
/// - `NotifyWriter` - spawn this with `tokio::spawn(writer.run())`
pub fn create_notifier(log: Arc<NotificationLog>, buffer_size: usize) -> (NotifyHandle, NotifyWriter) {
    let (tx, rx) = mpsc::channel(buffer_size);
    let handle = NotifyHandle::new(tx);
    let writer = NotifyWriter::new(rx, log);
    (handle, writer)
}

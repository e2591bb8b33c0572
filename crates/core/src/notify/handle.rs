use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use super::NotifyEvent;

/// Envelope wrapping a notification event with its timestamp
#[derive(Debug, Clone)]
pub struct NotifyEnvelope {
    pub timestamp: DateTime<Utc>,
    pub event: NotifyEvent,
}

/// Handle for emitting notifications
///
/// Cheaply cloneable and shareable across tasks. Events are sent through an
/// async channel to be collected by the NotifyWriter.
#[derive(Clone)]
pub struct NotifyHandle {
    tx: mpsc::Sender<NotifyEnvelope>,
}

impl NotifyHandle {
    pub fn new(tx: mpsc::Sender<NotifyEnvelope>) -> Self {
        Self { tx }
    }

    /// Emit a notification asynchronously
    ///
    /// Non-blocking for the caller's purposes: if the channel is full or
    /// closed, the error is logged but the caller is not failed.
    pub async fn emit(&self, event: NotifyEvent) {
        let envelope = NotifyEnvelope {
            timestamp: Utc::now(),
            event,
        };
        if let Err(e) = self.tx.send(envelope).await {
            tracing::error!("Failed to emit notification: {}", e);
        }
    }

    /// Try to emit a notification without blocking
    ///
    /// Returns true if the event was sent successfully.
    pub fn try_emit(&self, event: NotifyEvent) -> bool {
        let envelope = NotifyEnvelope {
            timestamp: Utc::now(),
            event,
        };
        match self.tx.try_send(envelope) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to emit notification: {}", e);
                false
            }
        }
    }
}

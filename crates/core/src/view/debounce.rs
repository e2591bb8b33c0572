//! Cancellable-timer debouncer.
//!
//! Holds at most one pending timer. Scheduling again before the quiescence
//! window elapses discards the pending timer and starts a fresh one; timer
//! reset is the only cancellation semantic.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Run `action` after the quiescence window, replacing any pending timer.
    pub fn call<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });

        if let Some(previous) = self.pending.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }

    /// Discard the pending timer, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().unwrap().take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

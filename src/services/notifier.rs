//! Transient user notifications for failures that must not break the view.

use std::sync::Mutex;

use crate::types::errors::ApiError;

/// Receives failures the UI should surface as a toast or banner.
pub trait Notifier: Send + Sync {
    fn notify(&self, error: &ApiError);
}

/// Keeps notifications in memory until drained by the caller.
#[derive(Debug, Default)]
pub struct QueuedNotifier {
    pending: Mutex<Vec<String>>,
}

impl QueuedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the queued messages.
    pub fn drain(&self) -> Vec<String> {
        self.pending
            .lock()
            .map(|mut p| std::mem::take(&mut *p))
            .unwrap_or_default()
    }
}

impl Notifier for QueuedNotifier {
    fn notify(&self, error: &ApiError) {
        tracing::warn!(%error, transient = error.is_transient(), "history pagination stalled");
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(error.to_string());
        }
    }
}

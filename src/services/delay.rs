//! Injectable pause applied before each history fetch.

use std::time::Duration;

use async_trait::async_trait;

/// A pause the fetch gate awaits while a fetch is already marked in flight.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self);
}

/// Sleeps for a fixed duration on the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

#[async_trait]
impl Delay for FixedDelay {
    async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Returns immediately. Used by tests and when the delay is configured to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self) {}
}

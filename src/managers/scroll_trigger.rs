//! Scroll Trigger Adapter.
//!
//! Turns "how far is the viewport from the end of the list" samples into
//! `FetchGate::request_next_page` calls. It refuses on its own when the list
//! is exhausted or a fetch is running, and can be throttled to one call-out
//! per interval, but the gate remains the authority on single-flight.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::managers::fetch_gate::{FetchGate, FetchOutcome};
use crate::services::notifier::Notifier;
use crate::types::errors::ApiError;

/// One sample of the list's scroll geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_offset: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    /// Geometry of an empty list: the end is already visible.
    pub fn at_end() -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height: 0.0,
            content_height: 0.0,
        }
    }

    /// Distance between the bottom of the viewport and the end of the list.
    pub fn remaining(&self) -> f64 {
        (self.content_height - self.scroll_offset - self.viewport_height).max(0.0)
    }
}

/// Pure firing rule shared by the adapter and any other scroll source.
pub fn should_fire(threshold: f64, metrics: &ScrollMetrics, has_more: bool, is_loading: bool) -> bool {
    has_more && !is_loading && metrics.remaining() <= threshold.max(0.0)
}

/// What happened to one proximity sample.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// Not near the end, nothing left to load, or a fetch is running.
    Ignored,
    /// Near the end but inside the minimum interval since the last call-out.
    Throttled,
    Completed(FetchOutcome),
    /// The fetch failed; the notifier has already been told.
    Failed(ApiError),
}

/// Minimum-interval limiter for call-outs.
struct FireLimiter {
    last_fire: Option<Instant>,
    min_interval: Duration,
}

impl FireLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_fire: None,
            min_interval,
        }
    }

    /// Returns true and records the call-out if the interval has passed.
    fn check(&mut self) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_fire {
            if now.duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_fire = Some(now);
        true
    }
}

/// Adapter between a scroll event source and a fetch gate.
pub struct ScrollTrigger {
    gate: Arc<FetchGate>,
    notifier: Arc<dyn Notifier>,
    threshold: f64,
    limiter: Mutex<FireLimiter>,
}

impl ScrollTrigger {
    pub fn new(
        gate: Arc<FetchGate>,
        notifier: Arc<dyn Notifier>,
        threshold: f64,
        min_interval: Duration,
    ) -> Self {
        Self {
            gate,
            notifier,
            threshold,
            limiter: Mutex::new(FireLimiter::new(min_interval)),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn gate(&self) -> &Arc<FetchGate> {
        &self.gate
    }

    /// Handles one proximity sample, fetching the next page if it qualifies.
    pub async fn on_near_end(&self, metrics: ScrollMetrics) -> TriggerOutcome {
        let has_more = self.gate.store().has_more();
        let is_loading = self.gate.is_loading();
        if !should_fire(self.threshold, &metrics, has_more, is_loading) {
            return TriggerOutcome::Ignored;
        }

        let allowed = self
            .limiter
            .lock()
            .map(|mut l| l.check())
            .unwrap_or(false);
        if !allowed {
            tracing::debug!("scroll trigger throttled");
            return TriggerOutcome::Throttled;
        }

        self.request_now().await
    }

    /// Asks the gate for the next page without looking at scroll geometry or
    /// the interval limiter. Failures still go to the notifier.
    pub async fn request_now(&self) -> TriggerOutcome {
        match self.gate.request_next_page().await {
            Ok(outcome) => TriggerOutcome::Completed(outcome),
            Err(err) => {
                self.notifier.notify(&err);
                TriggerOutcome::Failed(err)
            }
        }
    }

    /// Consumes scroll samples until every sender is dropped.
    ///
    /// Each qualifying sample is handled on its own task, so samples arriving
    /// while a fetch is running reach the gate concurrently and are refused
    /// there.
    pub async fn run(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<ScrollMetrics>) {
        let mut tasks: Vec<JoinHandle<TriggerOutcome>> = Vec::new();

        while let Some(metrics) = events.recv().await {
            tasks.retain(|t| !t.is_finished());
            let trigger = Arc::clone(&self);
            tasks.push(tokio::spawn(async move { trigger.on_near_end(metrics).await }));
        }

        for task in tasks {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "scroll trigger task panicked");
            }
        }
    }
}

/// Sending half handed to whatever observes the scroll container.
#[derive(Debug, Clone)]
pub struct ScrollEventSender {
    tx: mpsc::UnboundedSender<ScrollMetrics>,
}

impl ScrollEventSender {
    /// Reports a proximity sample. Returns false once the trigger has stopped.
    pub fn near_end(&self, metrics: ScrollMetrics) -> bool {
        self.tx.send(metrics).is_ok()
    }
}

/// Creates the event source pair consumed by [`ScrollTrigger::run`].
pub fn scroll_channel() -> (ScrollEventSender, mpsc::UnboundedReceiver<ScrollMetrics>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ScrollEventSender { tx }, rx)
}

//! History Sidebar.
//!
//! One mounted viewing session of the search history: a fresh store, the gate
//! that pages it, and the scroll trigger feeding the gate. Dropping or
//! unmounting the sidebar closes the store so late fetch results are dropped.

use std::sync::Arc;
use std::time::Duration;

use crate::managers::fetch_gate::FetchGate;
use crate::managers::history_store::{HistoryStore, HistoryStoreTrait, Listener, Subscription};
use crate::managers::history_sync;
use crate::managers::history_view::{self, HistoryRow, ViewContext};
use crate::managers::scroll_trigger::{ScrollMetrics, ScrollTrigger, TriggerOutcome};
use crate::services::delay::{Delay, FixedDelay, NoDelay};
use crate::services::history_api::HistoryFetcher;
use crate::services::notifier::Notifier;
use crate::types::history::{HistoryChange, HistoryState};
use crate::types::session::AccessToken;
use crate::types::settings::HistorySettings;

/// Paging knobs for one sidebar.
#[derive(Clone)]
pub struct SidebarConfig {
    pub threshold: f64,
    pub min_interval: Duration,
    pub delay: Arc<dyn Delay>,
}

impl SidebarConfig {
    /// Config without delay or throttling, for driving a sidebar synchronously.
    pub fn immediate() -> Self {
        Self {
            threshold: 0.0,
            min_interval: Duration::ZERO,
            delay: Arc::new(NoDelay),
        }
    }
}

impl From<&HistorySettings> for SidebarConfig {
    fn from(settings: &HistorySettings) -> Self {
        let delay: Arc<dyn Delay> = if settings.fetch_delay_ms == 0 {
            Arc::new(NoDelay)
        } else {
            Arc::new(FixedDelay::from_millis(settings.fetch_delay_ms))
        };
        Self {
            threshold: settings.scroll_threshold_px,
            min_interval: Duration::from_millis(settings.scroll_min_interval_ms),
            delay,
        }
    }
}

/// A mounted history view.
pub struct HistorySidebar {
    store: Arc<HistoryStore>,
    gate: Arc<FetchGate>,
    trigger: Arc<ScrollTrigger>,
}

impl HistorySidebar {
    /// Mounts a sidebar with an empty store starting at page 1.
    pub fn mount(
        fetcher: Arc<dyn HistoryFetcher>,
        token: AccessToken,
        notifier: Arc<dyn Notifier>,
        config: SidebarConfig,
    ) -> Self {
        let store = HistoryStore::new();
        let gate = Arc::new(FetchGate::new(
            Arc::clone(&store),
            fetcher,
            token,
            config.delay,
        ));
        let trigger = Arc::new(ScrollTrigger::new(
            Arc::clone(&gate),
            notifier,
            config.threshold,
            config.min_interval,
        ));
        tracing::info!("history sidebar mounted");

        Self {
            store,
            gate,
            trigger,
        }
    }

    pub fn store(&self) -> &Arc<HistoryStore> {
        &self.store
    }

    pub fn gate(&self) -> &Arc<FetchGate> {
        &self.gate
    }

    pub fn trigger(&self) -> &Arc<ScrollTrigger> {
        &self.trigger
    }

    pub fn state(&self) -> HistoryState {
        self.store.read()
    }

    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.store.subscribe(listener)
    }

    /// Loads the first page: an empty list has its end in view.
    pub async fn load_initial(&self) -> TriggerOutcome {
        self.trigger.on_near_end(ScrollMetrics::at_end()).await
    }

    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> TriggerOutcome {
        self.trigger.on_near_end(metrics).await
    }

    pub fn apply_change(&self, change: HistoryChange) -> bool {
        history_sync::apply_change(&self.store, change)
    }

    pub fn rows(&self, ctx: &ViewContext) -> Vec<HistoryRow> {
        history_view::render(&self.store.read(), self.gate.is_loading(), ctx)
    }

    pub fn is_mounted(&self) -> bool {
        self.store.is_alive()
    }

    /// Closes the store; any fetch still running will not touch it.
    pub fn unmount(&self) {
        if self.store.is_alive() {
            self.store.close();
            tracing::info!("history sidebar unmounted");
        }
    }
}

impl Drop for HistorySidebar {
    fn drop(&mut self) {
        self.unmount();
    }
}

//! Fetch Gate for the history sidebar.
//!
//! Owns the pagination algorithm: at most one page request is outstanding per
//! store, nothing is requested once the server reported the end of the list,
//! and the cursor only moves after a page has been merged.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::services::delay::Delay;
use crate::services::history_api::HistoryFetcher;
use crate::types::errors::ApiError;
use crate::types::session::AccessToken;

/// Why a `request_next_page` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The last fetched page reported `has_more == false`.
    Exhausted,
    /// Another fetch for this store has not finished yet.
    InFlight,
    /// The view owning the store has been unmounted.
    Closed,
}

/// Result of a `request_next_page` call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    Skipped { reason: SkipReason },
    /// The page was merged into the store.
    Appended { page: u32, added: usize, has_more: bool },
    /// The page arrived after the view was unmounted and was dropped.
    Discarded { page: u32 },
}

/// Clears the in-flight flag however the fetch ends, including when the
/// future is dropped before completion.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Single-flight pager bound to one store and one credential.
pub struct FetchGate {
    store: Arc<HistoryStore>,
    fetcher: Arc<dyn HistoryFetcher>,
    token: AccessToken,
    delay: Arc<dyn Delay>,
    in_flight: AtomicBool,
}

impl FetchGate {
    pub fn new(
        store: Arc<HistoryStore>,
        fetcher: Arc<dyn HistoryFetcher>,
        token: AccessToken,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self {
            store,
            fetcher,
            token,
            delay,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<HistoryStore> {
        &self.store
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetches and merges the next page unless gated.
    ///
    /// Failures leave the store untouched so a later call retries the same
    /// page.
    pub async fn request_next_page(&self) -> Result<FetchOutcome, ApiError> {
        if !self.store.is_alive() {
            return Ok(skipped(SkipReason::Closed));
        }
        if !self.store.has_more() {
            return Ok(skipped(SkipReason::Exhausted));
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("history fetch already in flight");
            return Ok(skipped(SkipReason::InFlight));
        }
        let _guard = InFlightGuard(&self.in_flight);

        // has_more may have flipped between the check and the claim.
        if !self.store.has_more() {
            return Ok(skipped(SkipReason::Exhausted));
        }

        self.delay.wait().await;

        let page_index = self.store.read().next_page_cursor;
        tracing::debug!(page = page_index, "requesting history page");

        let page = match self.fetcher.fetch_history_page(&self.token, page_index).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(page = page_index, error = %err, "history page fetch failed");
                return Err(err);
            }
        };

        if !self.store.is_alive() {
            tracing::debug!(page = page_index, "dropping history page for unmounted view");
            return Ok(FetchOutcome::Discarded { page: page_index });
        }

        let mut added = 0;
        let mut has_more = page.has_more;
        let stored = self.store.update(|current| {
            let merged = current.merged_with(page);
            added = merged.entries.len() - current.entries.len();
            has_more = merged.has_more;
            Some(merged)
        });

        if !stored {
            return Ok(FetchOutcome::Discarded { page: page_index });
        }

        tracing::debug!(page = page_index, added, has_more, "merged history page");
        Ok(FetchOutcome::Appended {
            page: page_index,
            added,
            has_more,
        })
    }
}

fn skipped(reason: SkipReason) -> FetchOutcome {
    FetchOutcome::Skipped { reason }
}

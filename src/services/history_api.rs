//! Remote search-history collaborator.
//!
//! `HistoryFetcher` is the seam the fetch gate depends on; `BackendClient`
//! implements it against `GET /api/search/search_history`.

use async_trait::async_trait;

use crate::services::backend_client::BackendClient;
use crate::types::errors::ApiError;
use crate::types::history::HistoryPage;
use crate::types::session::AccessToken;

/// Fetches one page of the signed-in user's search history.
#[async_trait]
pub trait HistoryFetcher: Send + Sync {
    /// `page_index` starts at 1.
    async fn fetch_history_page(
        &self,
        token: &AccessToken,
        page_index: u32,
    ) -> Result<HistoryPage, ApiError>;
}

#[async_trait]
impl HistoryFetcher for BackendClient {
    async fn fetch_history_page(
        &self,
        token: &AccessToken,
        page_index: u32,
    ) -> Result<HistoryPage, ApiError> {
        if token.is_empty() {
            return Err(ApiError::Auth("missing access token".to_string()));
        }

        let request = self
            .get("search_history", token)
            .query(&[("page", page_index), ("limit", self.page_size())]);

        let page: HistoryPage = self.send_json(request).await?;
        tracing::debug!(
            page = page_index,
            entries = page.searches.len(),
            has_more = page.has_more,
            "fetched history page"
        );
        Ok(page)
    }
}

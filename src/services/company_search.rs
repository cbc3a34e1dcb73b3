//! Company search collaborator.
//!
//! Runs new searches and reads or deletes stored ones. The backend reports
//! "no such ticker" with a bare `{"message": ...}` body and a 200 status, so
//! search responses are inspected before decoding.

use async_trait::async_trait;

use crate::services::backend_client::BackendClient;
use crate::types::company::{SearchDetail, SearchRequest, SearchResult};
use crate::types::errors::ApiError;
use crate::types::session::AccessToken;

/// Trait defining the company search operations.
#[async_trait]
pub trait CompanySearch: Send + Sync {
    async fn search_company(
        &self,
        token: &AccessToken,
        ticker: &str,
        days_ago: u32,
    ) -> Result<SearchResult, ApiError>;
    async fn get_search(&self, token: &AccessToken, search_id: u64) -> Result<SearchDetail, ApiError>;
    async fn delete_search(&self, token: &AccessToken, search_id: u64) -> Result<(), ApiError>;
}

#[async_trait]
impl CompanySearch for BackendClient {
    async fn search_company(
        &self,
        token: &AccessToken,
        ticker: &str,
        days_ago: u32,
    ) -> Result<SearchResult, ApiError> {
        let body = SearchRequest {
            ticker: ticker.trim().to_uppercase(),
            days_ago,
        };
        let request = self.post("search_company", token).json(&body);
        let value: serde_json::Value = self.send_json(request).await?;

        if value.get("search_id").is_none() {
            let message = value
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("An unexpected error occurred")
                .to_string();
            return Err(ApiError::NotFound(message));
        }

        serde_json::from_value(value).map_err(|e| ApiError::Server {
            status: 200,
            message: format!("invalid response body: {}", e),
        })
    }

    async fn get_search(&self, token: &AccessToken, search_id: u64) -> Result<SearchDetail, ApiError> {
        let request = self.get(&format!("get_search/{}", search_id), token);
        self.send_json(request).await
    }

    async fn delete_search(&self, token: &AccessToken, search_id: u64) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("delete/{}", search_id), token)
            .send()
            .await?;
        BackendClient::check_status(response).await?;
        tracing::info!(search_id, "deleted search");
        Ok(())
    }
}

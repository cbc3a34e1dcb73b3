use serde::{Deserialize, Serialize};

/// Body of a company search request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    pub ticker: String,
    pub days_ago: u32,
}

/// Result of running a company search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub company_name: String,
    pub ticker: String,
    pub search_id: u64,
    pub search_id_b64: String,
    #[serde(default)]
    pub company_id: Option<u64>,
    #[serde(default)]
    pub analysis: serde_json::Value,
}

/// A stored search with its analysis, fetched by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchDetail {
    pub id: u64,
    pub company_name: String,
    pub ticker: String,
    #[serde(default)]
    pub positive_summaries: Vec<serde_json::Value>,
    #[serde(default)]
    pub negative_summaries: Vec<serde_json::Value>,
    #[serde(default)]
    pub top_sources: Vec<serde_json::Value>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

use serde::{Deserialize, Serialize};

/// Largest page the backend will serve.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Shortest request timeout the HTTP client is built with.
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Top-level client settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClientSettings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub search: SearchSettings,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl ApiSettings {
    /// Request timeout, never below [`MIN_REQUEST_TIMEOUT_SECS`].
    pub fn effective_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 15,
        }
    }
}

/// Search-history sidebar paging behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistorySettings {
    pub page_size: u32,
    pub fetch_delay_ms: u64,
    pub scroll_threshold_px: f64,
    pub scroll_min_interval_ms: u64,
}

impl HistorySettings {
    /// Page size clamped to what the backend accepts.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            page_size: 30,
            fetch_delay_ms: 500,
            scroll_threshold_px: 0.0,
            scroll_min_interval_ms: 0,
        }
    }
}

/// Company search defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub default_days_ago: u32,
}

impl ClientSettings {
    /// Rejects values that parse but cannot work.
    pub fn validate(&self) -> Result<(), String> {
        if self.api.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS {
            return Err(format!(
                "api.request_timeout_secs must be at least {}",
                MIN_REQUEST_TIMEOUT_SECS
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err("api.base_url must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { default_days_ago: 7 }
    }
}

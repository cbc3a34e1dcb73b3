use thiserror::Error;

// === ApiError ===

/// Errors returned by the remote search and history APIs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The access token is missing, invalid, or expired.
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status or an unreadable body.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// The requested search or company does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The daily search quota is used up.
    #[error("Rate limited: {0}")]
    RateLimited(String),
}

impl ApiError {
    /// Whether scrolling again may succeed without user action.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Server {
                status: err.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("invalid response body: {}", err),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === CodecError ===

/// Errors decoding a search id from its route form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Empty search id")]
    Empty,
    #[error("Invalid search id encoding: {0}")]
    InvalidEncoding(String),
    #[error("Search id too large: {0} bytes")]
    TooLarge(usize),
}

// === AppError ===

/// Errors raised by application-level operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// An operation needed a signed-in user.
    #[error("Not signed in")]
    NotSignedIn,
    /// No history sidebar is currently mounted.
    #[error("History view is not open")]
    HistoryNotOpen,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

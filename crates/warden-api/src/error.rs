//! Error types

/// Client construction errors
///
/// Raised while building a repository from configuration. Accounts
/// operations never return these; they report failures through
/// [`crate::ApiResult`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration rejected
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Base URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by an [`crate::HttpTransport`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Request timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Connection could not be established or was reset
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request could not be built or sent
    #[error("Request error: {0}")]
    Request(String),

    /// Response body could not be read
    #[error("Body error: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connection(e.to_string())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

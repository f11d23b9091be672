//! Typed API results

use reqwest::StatusCode;
use std::collections::BTreeMap;
use std::fmt;

/// Why an API call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No network reachability
    NotConnected,
    /// Missing, expired or empty bearer token
    NotAuthenticated,
    /// The request never produced a response (DNS, TLS, timeout, reset)
    NetworkError,
    /// Non-success HTTP status
    ServerError,
    /// Success status with a body that could not be parsed
    MalformedResponse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::NotConnected => write!(f, "NotConnected"),
            ApiErrorKind::NotAuthenticated => write!(f, "NotAuthenticated"),
            ApiErrorKind::NetworkError => write!(f, "NetworkError"),
            ApiErrorKind::ServerError => write!(f, "ServerError"),
            ApiErrorKind::MalformedResponse => write!(f, "MalformedResponse"),
        }
    }
}

/// Failed API call
///
/// `status_code` is set exactly when a response was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    kind: ApiErrorKind,
    status_code: Option<StatusCode>,
    message: Option<String>,
    validation_errors: BTreeMap<String, Vec<String>>,
}

impl ApiFailure {
    /// Device is offline
    pub fn not_connected() -> Self {
        Self::bare(ApiErrorKind::NotConnected, None, None)
    }

    /// No usable bearer token
    pub fn not_authenticated() -> Self {
        Self::bare(ApiErrorKind::NotAuthenticated, None, None)
    }

    /// Transport failed before a response arrived
    pub fn network_error(message: impl Into<String>) -> Self {
        Self::bare(ApiErrorKind::NetworkError, None, Some(message.into()))
    }

    /// Server answered with a non-success status
    pub fn server_error(status_code: StatusCode, message: Option<String>) -> Self {
        Self::bare(ApiErrorKind::ServerError, Some(status_code), message)
    }

    /// Server answered success with an unusable body
    pub fn malformed_response(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self::bare(
            ApiErrorKind::MalformedResponse,
            Some(status_code),
            Some(message.into()),
        )
    }

    fn bare(kind: ApiErrorKind, status_code: Option<StatusCode>, message: Option<String>) -> Self {
        Self {
            kind,
            status_code,
            message,
            validation_errors: BTreeMap::new(),
        }
    }

    /// Attach per-field validation errors reported by the server
    pub fn with_validation_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.validation_errors = errors;
        self
    }

    /// Failure kind
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// HTTP status, when a response was received
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    /// Human-readable detail, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Per-field validation errors, keyed by field name
    pub fn validation_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.validation_errors
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(status) = self.status_code {
            write!(f, " ({})", status.as_u16())?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiFailure {}

/// Outcome of an API operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult<T> {
    /// Call succeeded
    Success {
        /// Decoded payload
        payload: T,
        /// HTTP status received
        status_code: StatusCode,
    },
    /// Call failed
    Failure(ApiFailure),
}

impl<T> ApiResult<T> {
    /// Successful result
    pub fn success(payload: T, status_code: StatusCode) -> Self {
        ApiResult::Success {
            payload,
            status_code,
        }
    }

    /// Check for success
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success { .. })
    }

    /// Payload on success
    pub fn payload(&self) -> Option<&T> {
        match self {
            ApiResult::Success { payload, .. } => Some(payload),
            ApiResult::Failure(_) => None,
        }
    }

    /// Failure details on failure
    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            ApiResult::Success { .. } => None,
            ApiResult::Failure(failure) => Some(failure),
        }
    }

    /// Failure kind on failure
    pub fn error_kind(&self) -> Option<ApiErrorKind> {
        self.failure().map(ApiFailure::kind)
    }

    /// HTTP status, when a response was received
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ApiResult::Success { status_code, .. } => Some(*status_code),
            ApiResult::Failure(failure) => failure.status_code(),
        }
    }

    /// Transform the payload, keeping the status
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            ApiResult::Success {
                payload,
                status_code,
            } => ApiResult::Success {
                payload: f(payload),
                status_code,
            },
            ApiResult::Failure(failure) => ApiResult::Failure(failure),
        }
    }

    /// Convert into a `Result` for use with `?`
    pub fn into_result(self) -> std::result::Result<T, ApiFailure> {
        match self {
            ApiResult::Success { payload, .. } => Ok(payload),
            ApiResult::Failure(failure) => Err(failure),
        }
    }
}

impl<T> From<ApiFailure> for ApiResult<T> {
    fn from(failure: ApiFailure) -> Self {
        ApiResult::Failure(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_when_response_received() {
        assert_eq!(ApiFailure::not_connected().status_code(), None);
        assert_eq!(ApiFailure::not_authenticated().status_code(), None);
        assert_eq!(ApiFailure::network_error("reset").status_code(), None);
        assert_eq!(
            ApiFailure::server_error(StatusCode::BAD_REQUEST, None).status_code(),
            Some(StatusCode::BAD_REQUEST)
        );
        assert_eq!(
            ApiFailure::malformed_response(StatusCode::OK, "abc").status_code(),
            Some(StatusCode::OK)
        );
    }

    #[test]
    fn test_accessors() {
        let ok: ApiResult<u32> = ApiResult::success(7, StatusCode::OK);
        assert!(ok.is_success());
        assert_eq!(ok.payload(), Some(&7));
        assert_eq!(ok.error_kind(), None);
        assert_eq!(ok.status_code(), Some(StatusCode::OK));

        let failed: ApiResult<u32> = ApiFailure::not_connected().into();
        assert!(!failed.is_success());
        assert_eq!(failed.payload(), None);
        assert_eq!(failed.error_kind(), Some(ApiErrorKind::NotConnected));
    }

    #[test]
    fn test_map_and_into_result() {
        let ok = ApiResult::success(2u32, StatusCode::CREATED).map(|n| n * 10);
        assert_eq!(ok.status_code(), Some(StatusCode::CREATED));
        assert_eq!(ok.into_result().unwrap(), 20);

        let failed: ApiResult<u32> = ApiFailure::network_error("dns").into();
        let err = failed.map(|n| n + 1).into_result().unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::NetworkError);
    }

    #[test]
    fn test_failure_display() {
        let failure = ApiFailure::server_error(
            StatusCode::BAD_REQUEST,
            Some("Email is already taken.".to_string()),
        );
        assert_eq!(failure.to_string(), "ServerError (400): Email is already taken.");
        assert_eq!(ApiFailure::not_connected().to_string(), "NotConnected");
    }
}

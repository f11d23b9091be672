//! Response classification
//!
//! Turns a received [`HttpResponse`] into an [`ApiResult`]. Status codes
//! outside 2xx become `ServerError`, enriched from the server's error body
//! when it has one. Success bodies that do not parse become
//! `MalformedResponse`.

use crate::models::ErrorResponse;
use crate::transport::HttpResponse;
use crate::{ApiFailure, ApiResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Status-only endpoints
pub fn classify_empty(response: &HttpResponse) -> ApiResult<()> {
    if !response.status.is_success() {
        return map_error(response).into();
    }
    ApiResult::success((), response.status)
}

/// JSON endpoints
pub fn classify_json<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    if !response.status.is_success() {
        return map_error(response).into();
    }

    match serde_json::from_str(&response.body) {
        Ok(payload) => ApiResult::success(payload, response.status),
        Err(e) => {
            warn!("Malformed JSON body (status {}): {}", response.status.as_u16(), e);
            ApiFailure::malformed_response(response.status, e.to_string()).into()
        }
    }
}

/// Nullable epoch-millisecond timestamp sent as text
///
/// `null` is a successful `None`. Anything that is not an integer within the
/// representable date range is `MalformedResponse`.
pub fn classify_revision_date(response: &HttpResponse) -> ApiResult<Option<DateTime<Utc>>> {
    if !response.status.is_success() {
        return map_error(response).into();
    }

    let text = response.body.trim();
    let text = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    if text == "null" {
        return ApiResult::success(None, response.status);
    }

    let parsed = text
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis);
    match parsed {
        Some(date) => ApiResult::success(Some(date), response.status),
        None => {
            warn!(
                "Malformed revision date body (status {})",
                response.status.as_u16()
            );
            ApiFailure::malformed_response(
                response.status,
                format!("expected epoch milliseconds or null, got '{}'", text),
            )
            .into()
        }
    }
}

/// Build the failure for a non-success response
///
/// Uses the first validation error as the message when present, else the
/// top-level message. An empty or unparsable body yields the status alone.
pub fn map_error(response: &HttpResponse) -> ApiFailure {
    let body = response.body.trim();
    if body.is_empty() {
        return ApiFailure::server_error(response.status, None);
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) => {
            let message = error.first_message();
            ApiFailure::server_error(response.status, message)
                .with_validation_errors(error.validation_errors.into_map())
        }
        Err(_) => ApiFailure::server_error(response.status, None),
    }
}

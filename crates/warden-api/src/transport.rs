//! HTTP transport
//!
//! [`HttpTransport`] is the seam between the repository and the network.
//! [`ReqwestTransport`] is the production implementation; tests substitute
//! their own.

use crate::{ApiConfig, ApiRequest, Result, TransportError};
use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

/// Header carrying the client device type
pub const DEVICE_TYPE_HEADER: &str = "Device-Type";

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: StatusCode,
    /// Body text (empty when the server sent none)
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one prepared request and returns one response
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request; no retries
    async fn send(&self, request: &ApiRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// reqwest-backed transport
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
    device_type: String,
}

impl ReqwestTransport {
    /// Build from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            device_type: config.device_type.to_string(),
        })
    }

    /// Base address requests are joined under
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> std::result::Result<HttpResponse, TransportError> {
        let url = self
            .base_url
            .join(request.path())
            .map_err(|e| TransportError::Request(format!("invalid path: {}", e)))?;

        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .header(DEVICE_TYPE_HEADER, &self.device_type);
        if let Some(token) = request.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

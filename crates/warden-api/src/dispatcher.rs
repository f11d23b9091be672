//! Request dispatcher

use crate::transport::{HttpResponse, HttpTransport};
use crate::{ApiFailure, ApiRequest};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sends exactly one request per call and converts transport errors
#[derive(Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn HttpTransport>,
}

impl RequestDispatcher {
    /// Create over a transport
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Send the request, mapping any transport failure to `NetworkError`
    pub async fn send(&self, request: &ApiRequest) -> std::result::Result<HttpResponse, ApiFailure> {
        debug!(
            "Sending {}: {} /{}",
            request.operation(),
            request.method(),
            request.path()
        );

        match self.transport.send(request).await {
            Ok(response) => {
                debug!(
                    "{} responded with status {}",
                    request.operation(),
                    response.status.as_u16()
                );
                Ok(response)
            }
            Err(e) => {
                warn!("{} failed in transport: {}", request.operation(), e);
                Err(ApiFailure::network_error(e.to_string()))
            }
        }
    }
}

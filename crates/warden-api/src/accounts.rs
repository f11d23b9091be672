//! Accounts API repository
//!
//! Registration, password hints, and the authenticated account reads
//! (revision date, profile, keys) under the `accounts` route.

use crate::classifier::{classify_empty, classify_json, classify_revision_date};
use crate::dispatcher::RequestDispatcher;
use crate::gate::{Auth, PreconditionGate};
use crate::models::{KeysResponse, PasswordHintRequest, ProfileResponse, RegisterRequest};
use crate::state::{Connectivity, TokenService};
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};
use crate::{ApiConfig, ApiFailure, ApiRequest, ApiResult, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

const API_ROUTE: &str = "accounts";

fn route(endpoint: &str) -> String {
    format!("{}/{}", API_ROUTE, endpoint)
}

/// Client for the `accounts` API route
///
/// Cheap to clone and safe to share; operations take `&self` and may run
/// concurrently.
#[derive(Clone)]
pub struct AccountsApiRepository {
    gate: PreconditionGate,
    dispatcher: RequestDispatcher,
}

impl AccountsApiRepository {
    /// Create over explicit collaborators
    pub fn new(
        connectivity: Arc<dyn Connectivity>,
        tokens: Arc<dyn TokenService>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            gate: PreconditionGate::new(connectivity, tokens),
            dispatcher: RequestDispatcher::new(transport),
        }
    }

    /// Create with the reqwest transport built from `config`
    pub fn from_config(
        config: &ApiConfig,
        connectivity: Arc<dyn Connectivity>,
        tokens: Arc<dyn TokenService>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(connectivity, tokens, Arc::new(transport)))
    }

    /// `POST accounts/register`
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        let prepared = ApiRequest::post("register", &route("register"), request);
        self.execute(Auth::None, prepared, classify_empty).await
    }

    /// `POST accounts/password-hint`
    pub async fn password_hint(&self, request: &PasswordHintRequest) -> ApiResult<()> {
        let prepared = ApiRequest::post("password_hint", &route("password-hint"), request);
        self.execute(Auth::None, prepared, classify_empty).await
    }

    /// `GET accounts/revision-date`; `None` when the account has never changed
    pub async fn revision_date(&self) -> ApiResult<Option<DateTime<Utc>>> {
        let prepared = Ok(ApiRequest::get("revision_date", &route("revision-date")));
        self.execute(Auth::Bearer, prepared, classify_revision_date)
            .await
    }

    /// `GET accounts/profile`
    pub async fn profile(&self) -> ApiResult<ProfileResponse> {
        let prepared = Ok(ApiRequest::get("profile", &route("profile")));
        self.execute(Auth::Bearer, prepared, classify_json).await
    }

    /// `GET accounts/keys`
    pub async fn keys(&self) -> ApiResult<KeysResponse> {
        let prepared = Ok(ApiRequest::get("keys", &route("keys")));
        self.execute(Auth::Bearer, prepared, classify_json).await
    }

    async fn execute<T>(
        &self,
        auth: Auth,
        prepared: std::result::Result<ApiRequest, serde_json::Error>,
        classify: impl FnOnce(&HttpResponse) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let token = match self.gate.check(auth).await {
            Ok(token) => token,
            Err(failure) => return failure.into(),
        };

        let request = match prepared {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to encode request body: {}", e);
                return ApiFailure::network_error(format!("failed to encode request: {}", e))
                    .into();
            }
        };
        let request = match token {
            Some(token) => request.with_bearer_token(token),
            None => request,
        };

        match self.dispatcher.send(&request).await {
            Ok(response) => classify(&response),
            Err(failure) => failure.into(),
        }
    }
}

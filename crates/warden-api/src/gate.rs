//! Precondition gate
//!
//! Runs before every request. Connectivity is checked first, then the token
//! for operations that need one. A failed check ends the operation without a
//! network call.

use crate::state::{Connectivity, TokenService, TokenState};
use crate::ApiFailure;
use std::sync::Arc;
use tracing::debug;

/// Authentication an operation needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Anonymous endpoint
    None,
    /// Bearer token required
    Bearer,
}

/// Connectivity and token check
#[derive(Clone)]
pub struct PreconditionGate {
    connectivity: Arc<dyn Connectivity>,
    tokens: Arc<dyn TokenService>,
}

impl PreconditionGate {
    /// Create a gate over the app's connectivity and token state
    pub fn new(connectivity: Arc<dyn Connectivity>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            connectivity,
            tokens,
        }
    }

    /// Check preconditions, yielding the bearer token when `auth` needs one
    pub async fn check(&self, auth: Auth) -> std::result::Result<Option<String>, ApiFailure> {
        if !self.connectivity.is_connected() {
            debug!("Precondition failed: not connected");
            return Err(ApiFailure::not_connected());
        }

        match auth {
            Auth::None => Ok(None),
            Auth::Bearer => match self.tokens.token_state().await {
                TokenState::Valid(token) if !token.is_empty() => Ok(Some(token)),
                state => {
                    debug!("Precondition failed: token state {:?}", state);
                    Err(ApiFailure::not_authenticated())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SharedConnectivity, StaticTokenService};
    use crate::ApiErrorKind;

    fn gate(connected: bool, tokens: StaticTokenService) -> PreconditionGate {
        PreconditionGate::new(
            Arc::new(SharedConnectivity::new(connected)),
            Arc::new(tokens),
        )
    }

    #[tokio::test]
    async fn test_offline_wins_over_token() {
        let err = gate(false, StaticTokenService::logged_out())
            .check(Auth::Bearer)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::NotConnected);
    }

    #[tokio::test]
    async fn test_anonymous_ignores_token() {
        let token = gate(true, StaticTokenService::logged_out())
            .check(Auth::None)
            .await
            .unwrap();
        assert_eq!(token, None);
    }

    #[tokio::test]
    async fn test_bearer_requires_valid_token() {
        let expired = StaticTokenService::with_token("t");
        expired.expire();
        let err = gate(true, expired).check(Auth::Bearer).await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::NotAuthenticated);

        let empty = gate(true, StaticTokenService::with_token(""));
        let err = empty.check(Auth::Bearer).await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::NotAuthenticated);

        let valid = gate(true, StaticTokenService::with_token("tok"));
        assert_eq!(valid.check(Auth::Bearer).await.unwrap(), Some("tok".to_string()));
    }
}

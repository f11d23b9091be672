//! Ambient client state: connectivity and bearer token
//!
//! Both are owned elsewhere in the app; this crate only reads them.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Network reachability provider
pub trait Connectivity: Send + Sync {
    /// Whether the device currently has network access
    fn is_connected(&self) -> bool;
}

/// State of the current bearer token
#[derive(Clone, PartialEq, Eq)]
pub enum TokenState {
    /// Usable token
    Valid(String),
    /// No token (logged out)
    Missing,
    /// Token present but expired and not refreshable here
    Expired,
}

impl std::fmt::Debug for TokenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenState::Valid(_) => write!(f, "Valid(<redacted>)"),
            TokenState::Missing => write!(f, "Missing"),
            TokenState::Expired => write!(f, "Expired"),
        }
    }
}

/// Bearer token provider
///
/// Implementations may refresh an expiring token before answering.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Current token state
    async fn token_state(&self) -> TokenState;
}

/// Connectivity flag that the platform layer flips on reachability changes
#[derive(Debug)]
pub struct SharedConnectivity {
    connected: AtomicBool,
}

impl SharedConnectivity {
    /// Create with an initial state
    pub fn new(connected: bool) -> Self {
        Self {
            connected: AtomicBool::new(connected),
        }
    }

    /// Record a reachability change
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

impl Default for SharedConnectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for SharedConnectivity {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// Token holder set by the login flow
#[derive(Debug)]
pub struct StaticTokenService {
    state: RwLock<TokenState>,
}

impl StaticTokenService {
    /// Holder with a valid token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(TokenState::Valid(token.into())),
        }
    }

    /// Holder with no token
    pub fn logged_out() -> Self {
        Self {
            state: RwLock::new(TokenState::Missing),
        }
    }

    /// Replace the token
    pub fn set_token(&self, token: impl Into<String>) {
        *self.state.write() = TokenState::Valid(token.into());
    }

    /// Mark the token expired
    pub fn expire(&self) {
        *self.state.write() = TokenState::Expired;
    }

    /// Drop the token
    pub fn clear(&self) {
        *self.state.write() = TokenState::Missing;
    }
}

#[async_trait]
impl TokenService for StaticTokenService {
    async fn token_state(&self) -> TokenState {
        self.state.read().clone()
    }
}

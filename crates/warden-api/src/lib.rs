//! Warden accounts API client
//!
//! Every operation is one round trip: the precondition gate checks
//! connectivity and the bearer token, the dispatcher sends a single request,
//! and the classifier turns the response into an [`ApiResult`]. Nothing in an
//! operation returns `Err` or panics; failures are values.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accounts;
pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod models;
pub mod request;
pub mod result;
pub mod state;
pub mod transport;

pub use accounts::AccountsApiRepository;
pub use config::ApiConfig;
pub use dispatcher::RequestDispatcher;
pub use error::{Error, Result, TransportError};
pub use gate::{Auth, PreconditionGate};
pub use models::{
    ErrorResponse, KeysRequest, KeysResponse, PasswordHintRequest, ProfileOrganizationResponse,
    ProfileResponse, RegisterRequest, ValidationErrors,
};
pub use request::ApiRequest;
pub use result::{ApiErrorKind, ApiFailure, ApiResult};
pub use state::{Connectivity, SharedConnectivity, StaticTokenService, TokenService, TokenState};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

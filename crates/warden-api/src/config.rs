//! API client configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default API base address
pub const DEFAULT_BASE_URL: &str = "https://api.bitwarden.com";
/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default `Device-Type` header value (iOS)
pub const DEFAULT_DEVICE_TYPE: u8 = 1;

/// API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address; relative request paths are joined under it
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Device type sent with every request
    pub device_type: u8,
    /// User agent
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            device_type: DEFAULT_DEVICE_TYPE,
            user_agent: format!("warden/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Config for a specific server, other settings default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject unusable settings
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.request_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parsed base URL, always ending in `/`
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.device_type, 1);
        assert!(config.user_agent.starts_with("warden/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ApiConfig::with_base_url("https://vault.example.com/api");
        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "https://vault.example.com/api/");
        assert_eq!(
            url.join("accounts/profile").unwrap().as_str(),
            "https://vault.example.com/api/accounts/profile"
        );
    }

    #[test]
    fn test_from_json_partial() {
        let config = ApiConfig::from_json(r#"{"base_url":"http://localhost:4000"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:4000");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_validation_failures() {
        assert!(ApiConfig::with_base_url("not a url").validate().is_err());
        assert!(ApiConfig::with_base_url("ftp://example.com").validate().is_err());

        let zero_timeout = ApiConfig {
            request_timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(matches!(zero_timeout.validate(), Err(Error::InvalidConfig(_))));
        assert!(ApiConfig::from_json("{").is_err());
    }
}

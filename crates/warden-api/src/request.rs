//! Request descriptors

use reqwest::Method;
use serde::Serialize;
use std::fmt;

/// A single outgoing API request
///
/// Fields are fixed at construction. The path is relative to the configured
/// base address and never starts with `/`.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    operation: &'static str,
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    bearer_token: Option<String>,
}

impl ApiRequest {
    /// Request without a body
    pub fn new(operation: &'static str, method: Method, path: &str) -> Self {
        Self {
            operation,
            method,
            path: path.trim_start_matches('/').to_string(),
            body: None,
            bearer_token: None,
        }
    }

    /// GET request
    pub fn get(operation: &'static str, path: &str) -> Self {
        Self::new(operation, Method::GET, path)
    }

    /// POST request with a JSON body
    pub fn post<B: Serialize>(
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> std::result::Result<Self, serde_json::Error> {
        let body = serde_json::to_value(body)?;
        Ok(Self {
            body: Some(body),
            ..Self::new(operation, Method::POST, path)
        })
    }

    /// Same request carrying a bearer token
    pub fn with_bearer_token(self, token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            ..self
        }
    }

    /// Operation name, for diagnostics
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base address
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON body, if any
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Bearer token, if any
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("operation", &self.operation)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("has_body", &self.body.is_some())
            .field("has_token", &self.bearer_token.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_is_relative() {
        let request = ApiRequest::get("profile", "/accounts/profile");
        assert_eq!(request.path(), "accounts/profile");
        assert_eq!(request.method(), &Method::GET);
        assert!(request.body().is_none());
        assert!(request.bearer_token().is_none());
    }

    #[test]
    fn test_post_serializes_body() {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Hint {
            email: String,
        }

        let request = ApiRequest::post(
            "password_hint",
            "accounts/password-hint",
            &Hint {
                email: "a@b.c".to_string(),
            },
        )
        .unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.body(), Some(&json!({"Email": "a@b.c"})));
    }

    #[test]
    fn test_debug_hides_token_and_body() {
        let request = ApiRequest::post("register", "accounts/register", &json!({"Key": "secret"}))
            .unwrap()
            .with_bearer_token("tok-123");
        let debug = format!("{request:?}");

        assert_eq!(request.bearer_token(), Some("tok-123"));
        assert!(!debug.contains("tok-123"));
        assert!(!debug.contains("secret"));
    }
}

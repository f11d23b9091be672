//! Vault models

use serde::{Deserialize, Serialize};

use crate::CipherString;

/// Stored login record with encrypted fields
///
/// Fields are left `None` when they were never set on the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Login ID
    pub id: String,
    /// Owning organization; `None` for items in the user's personal vault
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Encrypted item name
    #[serde(default)]
    pub name: Option<CipherString>,
    /// Encrypted username
    #[serde(default)]
    pub username: Option<CipherString>,
    /// Encrypted password
    #[serde(default)]
    pub password: Option<CipherString>,
    /// Encrypted URI
    #[serde(default)]
    pub uri: Option<CipherString>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_deserializes_missing_fields_as_none() {
        let json = r#"{"id":"l1","name":"2.aXY=|bmFtZQ==|bWFj","password":null}"#;
        let login: Login = serde_json::from_str(json).unwrap();

        assert_eq!(login.id, "l1");
        assert!(login.organization_id.is_none());
        assert_eq!(login.name.unwrap().data(), "bmFtZQ==");
        assert!(login.username.is_none());
        assert!(login.password.is_none());
        assert!(login.uri.is_none());
    }

    #[test]
    fn test_login_rejects_malformed_cipher() {
        let json = r#"{"id":"l1","username":"2.only-one-segment"}"#;
        assert!(serde_json::from_str::<Login>(json).is_err());
    }
}

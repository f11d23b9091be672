//! Accounts API wire models
//!
//! The server speaks PascalCase JSON and sends `null` for unset members.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use warden_core::CipherString;

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Account registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterRequest {
    /// Display name
    pub name: Option<String>,
    /// Account email
    pub email: String,
    /// Hash of the master password
    pub master_password_hash: String,
    /// Optional master password hint
    pub master_password_hint: Option<String>,
    /// User symmetric key, encrypted with the master key
    pub key: CipherString,
    /// Asymmetric key pair, if generated at registration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<KeysRequest>,
}

/// Asymmetric key pair upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeysRequest {
    /// Public key (base64 SPKI)
    pub public_key: String,
    /// Private key, encrypted with the user key
    pub encrypted_private_key: CipherString,
}

/// Password hint request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PasswordHintRequest {
    /// Account email
    pub email: String,
}

/// Account profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileResponse {
    /// User ID
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Account email
    pub email: String,
    /// Whether the email has been verified
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_verified: bool,
    /// Master password hint
    #[serde(default)]
    pub master_password_hint: Option<String>,
    /// Preferred culture, e.g. `en-US`
    #[serde(default)]
    pub culture: Option<String>,
    /// Whether two-step login is enabled
    #[serde(default, deserialize_with = "null_as_default")]
    pub two_factor_enabled: bool,
    /// User symmetric key, encrypted with the master key
    #[serde(default)]
    pub key: Option<CipherString>,
    /// Private key, encrypted with the user key
    #[serde(default)]
    pub private_key: Option<CipherString>,
    /// Security stamp
    #[serde(default)]
    pub security_stamp: Option<String>,
    /// Organization memberships
    #[serde(default, deserialize_with = "null_as_default")]
    pub organizations: Vec<ProfileOrganizationResponse>,
}

/// Organization membership in a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileOrganizationResponse {
    /// Organization ID
    pub id: String,
    /// Organization name
    #[serde(default)]
    pub name: Option<String>,
    /// Organization key, encrypted with the user's public key
    #[serde(default)]
    pub key: Option<CipherString>,
    /// Membership status
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: u8,
    /// Membership type (owner, admin, user, ...)
    #[serde(rename = "Type", default, deserialize_with = "null_as_default")]
    pub membership_type: u8,
    /// Whether the organization is enabled
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
}

/// Account key pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeysResponse {
    /// Public key (base64 SPKI)
    #[serde(default)]
    pub public_key: Option<String>,
    /// Private key, encrypted with the user key
    #[serde(default)]
    pub private_key: Option<CipherString>,
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    /// Top-level message
    #[serde(default, alias = "message")]
    pub message: Option<String>,
    /// Per-field messages
    #[serde(default, alias = "validationErrors", deserialize_with = "null_as_default")]
    pub validation_errors: ValidationErrors,
}

impl ErrorResponse {
    /// First validation message the server sent, otherwise the top-level message
    pub fn first_message(&self) -> Option<String> {
        self.validation_errors
            .first_message()
            .map(str::to_string)
            .or_else(|| self.message.clone())
    }
}

/// Per-field validation messages, kept in the order the server sent them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<(String, Vec<String>)>);

impl ValidationErrors {
    /// Whether no field carried a message
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|(_, messages)| messages.is_empty())
    }

    /// First message of the first field that has one
    pub fn first_message(&self) -> Option<&str> {
        self.0
            .iter()
            .flat_map(|(_, messages)| messages.iter())
            .next()
            .map(String::as_str)
    }

    /// Fields in server order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Messages keyed by field name
    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        let mut map = BTreeMap::new();
        for (field, messages) in self.0 {
            map.entry(field)
                .or_insert_with(Vec::new)
                .extend(messages);
        }
        map
    }
}

impl<'de> Deserialize<'de> for ValidationErrors {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = ValidationErrors;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to messages")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Vec::new();
                while let Some((field, messages)) =
                    map.next_entry::<String, Option<Vec<String>>>()?
                {
                    fields.push((field, messages.unwrap_or_default()));
                }
                Ok(ValidationErrors(fields))
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_tolerates_nulls() {
        let body = json!({
            "Id": "u1",
            "Name": null,
            "Email": "user@example.com",
            "EmailVerified": null,
            "TwoFactorEnabled": true,
            "Key": "2.aXY=|a2V5|bWFj",
            "PrivateKey": null,
            "Organizations": null,
            "Object": "profile"
        });
        let profile: ProfileResponse = serde_json::from_value(body).unwrap();

        assert_eq!(profile.id, "u1");
        assert!(!profile.email_verified);
        assert!(profile.two_factor_enabled);
        assert_eq!(profile.key.unwrap().data(), "a2V5");
        assert!(profile.private_key.is_none());
        assert!(profile.organizations.is_empty());
    }

    #[test]
    fn test_profile_organizations() {
        let body = json!({
            "Id": "u1",
            "Email": "user@example.com",
            "Organizations": [
                {"Id": "o1", "Name": "Acme", "Key": "4.b3Jna2V5", "Status": 2, "Type": 0, "Enabled": true}
            ]
        });
        let profile: ProfileResponse = serde_json::from_value(body).unwrap();
        let org = &profile.organizations[0];

        assert_eq!(org.id, "o1");
        assert_eq!(org.status, 2);
        assert_eq!(org.membership_type, 0);
        assert!(org.enabled);
    }

    #[test]
    fn test_register_request_shape() {
        let request = RegisterRequest {
            name: Some("Ada".to_string()),
            email: "ada@example.com".to_string(),
            master_password_hash: "hash".to_string(),
            master_password_hint: None,
            key: "2.aXY=|a2V5|bWFj".parse().unwrap(),
            keys: None,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["Email"], json!("ada@example.com"));
        assert_eq!(value["MasterPasswordHash"], json!("hash"));
        assert_eq!(value["MasterPasswordHint"], json!(null));
        assert_eq!(value["Key"], json!("2.aXY=|a2V5|bWFj"));
        assert!(value.get("Keys").is_none());
    }

    #[test]
    fn test_error_first_message() {
        let empty = ErrorResponse::default();
        assert_eq!(empty.first_message(), None);

        let error: ErrorResponse =
            serde_json::from_str(r#"{"Message":"Invalid.","ValidationErrors":{}}"#).unwrap();
        assert_eq!(error.first_message(), Some("Invalid.".to_string()));

        let null_errors: ErrorResponse =
            serde_json::from_str(r#"{"Message":"Invalid.","ValidationErrors":null}"#).unwrap();
        assert!(null_errors.validation_errors.is_empty());
    }

    #[test]
    fn test_error_first_message_keeps_server_order() {
        let error: ErrorResponse = serde_json::from_str(
            r#"{"ValidationErrors":{"MasterPasswordHash":["Too short."],"Email":["Already taken."]}}"#,
        )
        .unwrap();
        assert_eq!(error.first_message(), Some("Too short.".to_string()));

        let fields: Vec<&str> = error.validation_errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["MasterPasswordHash", "Email"]);

        let map = error.validation_errors.into_map();
        assert_eq!(map["Email"], vec!["Already taken.".to_string()]);
    }
}

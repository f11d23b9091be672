//! Decrypted login projection for the share extension
//!
//! Decrypts the four display fields of a [`Login`] under the key of its
//! owning organization. Unset fields stay unset; a field that fails to
//! decrypt fails the whole projection with [`Error::Decryption`].

use crate::{CipherString, CryptoService, Error, Login, Result};
use std::fmt;
use tracing::warn;
use zeroize::Zeroize;

/// Plaintext view of a login record
#[derive(Clone, PartialEq, Eq)]
pub struct LoginView {
    /// Login ID
    pub id: String,
    /// Item name
    pub name: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
    /// URI
    pub uri: Option<String>,
}

impl LoginView {
    /// Decrypt a login record for display
    pub fn decrypt(login: &Login, crypto: &dyn CryptoService) -> Result<Self> {
        let org = login.organization_id.as_deref();
        let field = |name: &'static str, value: &Option<CipherString>| {
            decrypt_field(crypto, name, value.as_ref(), org).inspect_err(|e| {
                warn!("Failed to decrypt login {} field {}: {}", login.id, name, e);
            })
        };

        Ok(Self {
            id: login.id.clone(),
            name: field("name", &login.name)?,
            username: field("username", &login.username)?,
            password: field("password", &login.password)?,
            uri: field("uri", &login.uri)?,
        })
    }
}

fn decrypt_field(
    crypto: &dyn CryptoService,
    field: &'static str,
    value: Option<&CipherString>,
    organization_id: Option<&str>,
) -> Result<Option<String>> {
    let Some(cipher) = value else {
        return Ok(None);
    };
    crypto
        .decrypt(cipher, organization_id)
        .map(Some)
        .map_err(|e| Error::Decryption {
            field,
            reason: e.to_string(),
        })
}

impl Drop for LoginView {
    fn drop(&mut self) {
        self.name.zeroize();
        self.username.zeroize();
        self.password.zeroize();
        self.uri.zeroize();
    }
}

impl fmt::Debug for LoginView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginView")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("uri", &self.uri)
            .finish()
    }
}

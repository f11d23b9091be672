//! Test doubles for the crypto capability

use crate::{CipherString, CryptoService, EncryptionType, Error, Result};

const MARKER_MAC: &str = "marker";
const USER_SCOPE: &str = "user";

/// Build the marker cipher string that [`MarkerCrypto`] decrypts to `plaintext`
///
/// The iv segment records the owning scope and the data segment is the
/// plaintext itself, so decryption is the identity on the marker.
pub fn marker(plaintext: &str, organization_id: Option<&str>) -> CipherString {
    CipherString::new(
        EncryptionType::AesCbc256HmacSha256B64,
        Some(organization_id.unwrap_or(USER_SCOPE).to_string()),
        plaintext.to_string(),
        Some(MARKER_MAC.to_string()),
    )
    .expect("marker plaintext must be non-empty and free of '|'")
}

/// Crypto stub: identity on marker cipher strings, scoped by organization
#[derive(Debug, Default, Clone)]
pub struct MarkerCrypto {
    fail_on: Option<String>,
}

impl MarkerCrypto {
    /// Stub that decrypts every well-scoped marker
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub that reports a MAC failure for the marker carrying `plaintext`
    pub fn failing_on(plaintext: &str) -> Self {
        Self {
            fail_on: Some(plaintext.to_string()),
        }
    }
}

impl CryptoService for MarkerCrypto {
    fn encrypt(&self, plaintext: &str, organization_id: Option<&str>) -> Result<CipherString> {
        if plaintext.is_empty() || plaintext.contains('|') {
            return Err(Error::Crypto("marker plaintext not encodable".to_string()));
        }
        Ok(marker(plaintext, organization_id))
    }

    fn decrypt(&self, cipher: &CipherString, organization_id: Option<&str>) -> Result<String> {
        if cipher.mac() != Some(MARKER_MAC) {
            return Err(Error::Crypto("MAC verification failed".to_string()));
        }
        let scope = organization_id.unwrap_or(USER_SCOPE);
        if cipher.iv() != Some(scope) {
            return Err(Error::KeyNotFound(scope.to_string()));
        }
        if self.fail_on.as_deref() == Some(cipher.data()) {
            return Err(Error::Crypto("MAC verification failed".to_string()));
        }
        Ok(cipher.data().to_string())
    }
}

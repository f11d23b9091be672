//! Crypto capability
//!
//! The vault engine that owns key material lives outside this crate. Callers
//! hand it in as a [`CryptoService`] so every decrypt is scoped explicitly to
//! the owning organization (or to the user's own key when there is none).

use crate::{CipherString, Result};

/// Encrypt/decrypt capability scoped by owning context
pub trait CryptoService: Send + Sync {
    /// Encrypt plaintext under the key of `organization_id`, or the user key
    fn encrypt(&self, plaintext: &str, organization_id: Option<&str>) -> Result<CipherString>;

    /// Decrypt a cipher string under the key of `organization_id`, or the user key
    fn decrypt(&self, cipher: &CipherString, organization_id: Option<&str>) -> Result<String>;
}

/// Encrypt a string with the user's own key
pub fn encrypt_text(crypto: &dyn CryptoService, plaintext: &str) -> Result<CipherString> {
    crypto.encrypt(plaintext, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MarkerCrypto;

    #[test]
    fn test_encrypt_text_uses_user_key() {
        let crypto = MarkerCrypto::new();
        let cs = encrypt_text(&crypto, "hunter2").unwrap();

        assert_eq!(crypto.decrypt(&cs, None).unwrap(), "hunter2");
        assert!(crypto.decrypt(&cs, Some("org-1")).is_err());
    }
}

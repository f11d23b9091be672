//! Error types for Warden Core
//!
//! Error taxonomy for cipher string handling and vault decryption.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Warden Core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cipher string could not be parsed
    #[error("Invalid cipher string: {0}")]
    InvalidCipherString(String),

    /// A field of a vault item failed to decrypt
    #[error("Failed to decrypt {field}: {reason}")]
    Decryption {
        /// Name of the field being decrypted
        field: &'static str,
        /// Reason reported by the crypto engine
        reason: String,
    },

    /// Crypto engine failure (bad MAC, wrong key, corrupt payload)
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// No key material for the requested context
    #[error("Key not found: {0}")]
    KeyNotFound(String),
}

impl Error {
    /// Check if error is a user-facing error (vs internal error)
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Decryption { .. } | Error::KeyNotFound(_))
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Error::Decryption { .. } => {
                "This item could not be decrypted. Try syncing your vault and unlocking again."
                    .to_string()
            }
            Error::KeyNotFound(_) => {
                "The key for this item is not available. Try syncing your vault.".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidCipherString(_) => ErrorCategory::Encoding,
            Error::Decryption { .. } | Error::Crypto(_) => ErrorCategory::Crypto,
            Error::KeyNotFound(_) => ErrorCategory::Keys,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed encrypted values
    Encoding,
    /// Encryption/decryption failures
    Crypto,
    /// Missing key material
    Keys,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Encoding => write!(f, "Encoding"),
            ErrorCategory::Crypto => write!(f, "Crypto"),
            ErrorCategory::Keys => write!(f, "Keys"),
        }
    }
}

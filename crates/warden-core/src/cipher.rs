//! Encrypted field encoding
//!
//! Vault fields travel as cipher strings of the form
//! `<type>.<iv>|<data>|<mac>`. The header selects the encryption type, which
//! fixes how many `|`-separated segments follow. Values without a header
//! predate typed encoding and are inferred from their segment count.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encryption type carried in a cipher string header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptionType {
    /// AES-CBC-256, no MAC
    AesCbc256B64,
    /// AES-CBC-128 with HMAC-SHA256
    AesCbc128HmacSha256B64,
    /// AES-CBC-256 with HMAC-SHA256
    AesCbc256HmacSha256B64,
    /// RSA-2048 OAEP SHA-256
    Rsa2048OaepSha256B64,
    /// RSA-2048 OAEP SHA-1
    Rsa2048OaepSha1B64,
    /// RSA-2048 OAEP SHA-256 with HMAC-SHA256
    Rsa2048OaepSha256HmacSha256B64,
    /// RSA-2048 OAEP SHA-1 with HMAC-SHA256
    Rsa2048OaepSha1HmacSha256B64,
}

impl EncryptionType {
    /// Numeric identifier used in the header
    pub fn id(self) -> u8 {
        match self {
            Self::AesCbc256B64 => 0,
            Self::AesCbc128HmacSha256B64 => 1,
            Self::AesCbc256HmacSha256B64 => 2,
            Self::Rsa2048OaepSha256B64 => 3,
            Self::Rsa2048OaepSha1B64 => 4,
            Self::Rsa2048OaepSha256HmacSha256B64 => 5,
            Self::Rsa2048OaepSha1HmacSha256B64 => 6,
        }
    }

    /// Whether the payload includes an initialization vector
    pub fn has_iv(self) -> bool {
        matches!(
            self,
            Self::AesCbc256B64 | Self::AesCbc128HmacSha256B64 | Self::AesCbc256HmacSha256B64
        )
    }

    /// Whether the payload includes a MAC segment
    pub fn has_mac(self) -> bool {
        !matches!(
            self,
            Self::AesCbc256B64 | Self::Rsa2048OaepSha256B64 | Self::Rsa2048OaepSha1B64
        )
    }

    /// Number of `|`-separated segments after the header
    pub fn segment_count(self) -> usize {
        1 + usize::from(self.has_iv()) + usize::from(self.has_mac())
    }
}

impl TryFrom<u8> for EncryptionType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::AesCbc256B64),
            1 => Ok(Self::AesCbc128HmacSha256B64),
            2 => Ok(Self::AesCbc256HmacSha256B64),
            3 => Ok(Self::Rsa2048OaepSha256B64),
            4 => Ok(Self::Rsa2048OaepSha1B64),
            5 => Ok(Self::Rsa2048OaepSha256HmacSha256B64),
            6 => Ok(Self::Rsa2048OaepSha1HmacSha256B64),
            other => Err(Error::InvalidCipherString(format!(
                "unknown encryption type {}",
                other
            ))),
        }
    }
}

impl fmt::Display for EncryptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// An encrypted vault field in its wire encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CipherString {
    encryption_type: EncryptionType,
    iv: Option<String>,
    data: String,
    mac: Option<String>,
    encoded: String,
}

impl CipherString {
    /// Build a cipher string from its parts
    pub fn new(
        encryption_type: EncryptionType,
        iv: Option<String>,
        data: String,
        mac: Option<String>,
    ) -> Result<Self> {
        if encryption_type.has_iv() != iv.is_some() {
            return Err(Error::InvalidCipherString(format!(
                "type {} iv mismatch",
                encryption_type
            )));
        }
        if encryption_type.has_mac() != mac.is_some() {
            return Err(Error::InvalidCipherString(format!(
                "type {} mac mismatch",
                encryption_type
            )));
        }

        let segments: Vec<&str> = iv
            .as_deref()
            .into_iter()
            .chain(std::iter::once(data.as_str()))
            .chain(mac.as_deref())
            .collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidCipherString("empty segment".to_string()));
        }
        if segments.iter().any(|s| s.contains('|')) {
            return Err(Error::InvalidCipherString("segment contains '|'".to_string()));
        }
        let encoded = format!("{}.{}", encryption_type, segments.join("|"));

        Ok(Self {
            encryption_type,
            iv,
            data,
            mac,
            encoded,
        })
    }

    /// Encryption type
    pub fn encryption_type(&self) -> EncryptionType {
        self.encryption_type
    }

    /// Initialization vector (AES types only)
    pub fn iv(&self) -> Option<&str> {
        self.iv.as_deref()
    }

    /// Ciphertext payload
    pub fn data(&self) -> &str {
        &self.data
    }

    /// MAC (types with HMAC only)
    pub fn mac(&self) -> Option<&str> {
        self.mac.as_deref()
    }

    /// Wire encoding, exactly as parsed or built
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl FromStr for CipherString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidCipherString("empty value".to_string()));
        }

        let (encryption_type, body) = match s.split_once('.') {
            Some((header, body)) => {
                let id: u8 = header.parse().map_err(|_| {
                    Error::InvalidCipherString(format!("invalid header '{}'", header))
                })?;
                (EncryptionType::try_from(id)?, body)
            }
            None => {
                // Headerless values: three segments carry a MAC.
                let inferred = if s.split('|').count() == 3 {
                    EncryptionType::AesCbc128HmacSha256B64
                } else {
                    EncryptionType::AesCbc256B64
                };
                (inferred, s)
            }
        };

        let segments: Vec<&str> = body.split('|').collect();
        if segments.len() != encryption_type.segment_count() {
            return Err(Error::InvalidCipherString(format!(
                "type {} expects {} segments, found {}",
                encryption_type,
                encryption_type.segment_count(),
                segments.len()
            )));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidCipherString("empty segment".to_string()));
        }

        let mut parts = segments.into_iter().map(str::to_string);
        let iv = if encryption_type.has_iv() {
            parts.next()
        } else {
            None
        };
        let data = parts.next().unwrap_or_default();
        let mac = if encryption_type.has_mac() {
            parts.next()
        } else {
            None
        };

        Ok(Self {
            encryption_type,
            iv,
            data,
            mac,
            encoded: s.to_string(),
        })
    }
}

impl TryFrom<String> for CipherString {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CipherString> for String {
    fn from(value: CipherString) -> Self {
        value.encoded
    }
}

impl fmt::Display for CipherString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

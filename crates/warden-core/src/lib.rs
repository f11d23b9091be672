//! Warden vault core
//!
//! This crate holds the vault-side domain used by the mobile clients:
//! encrypted field encoding, the crypto capability seam, login records and
//! their decrypted view, and device layout adjustments.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cipher;
pub mod crypto;
pub mod error;
pub mod layout;
pub mod login_view;
pub mod models;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use cipher::{CipherString, EncryptionType};
pub use crypto::{encrypt_text, CryptoService};
pub use error::{Error, ErrorCategory, Result};
pub use layout::{
    focus_delay, margin_adjustment, padding_adjustment, DeviceInfo, Orientation, Platform, Size,
    Thickness, DEFAULT_FOCUS_DELAY,
};
pub use login_view::LoginView;
pub use models::Login;

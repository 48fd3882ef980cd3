//! Persistent key-value storage.
//!
//! A durable mapping from string keys to JSON values that survives process
//! restarts. The engine writes full snapshots under well-known keys on every
//! mutation; nothing here is incremental.
//!
//! # Error policy
//!
//! I/O failures surface as explicit [`StorageError::Read`] /
//! [`StorageError::Write`] values. Data that is present but malformed - a
//! corrupt store file, or a value that no longer matches the expected shape -
//! is logged at WARN and treated as absent. Callers can therefore always
//! distinguish "the disk failed" from "there was nothing usable there".

mod json;

pub use json::JsonStore;

use thiserror::Error;

/// Well-known storage keys.
///
/// The `@` prefix matches snapshots written by earlier versions of the app,
/// so existing on-device state keeps loading.
pub mod keys {
    /// The persisted [`cartwheel_core::User`] record.
    pub const USER: &str = "@user";
    /// The persisted cart snapshot, a bare sequence of line items.
    pub const CART: &str = "@cart";
    /// Whether the user opted to stay signed in.
    pub const REMEMBER_ME: &str = "@rememberMe";
    /// Whether a user is currently authenticated.
    pub const IS_LOGGED_IN: &str = "@isLoggedIn";
}

/// Errors that can occur against the persistent store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading from device storage failed.
    #[error("storage read failed: {0}")]
    Read(#[source] std::io::Error),

    /// Writing to device storage failed.
    #[error("storage write failed: {0}")]
    Write(#[source] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("storage value could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Read(std::io::Error::other("device unavailable"));
        assert_eq!(err.to_string(), "storage read failed: device unavailable");

        let err = StorageError::Write(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "storage write failed: disk full");
    }
}

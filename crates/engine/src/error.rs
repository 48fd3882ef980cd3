//! Unified error handling for the engine.
//!
//! Each concern has its own error enum (`StorageError`, `CatalogError`,
//! `AuthError`, `ConfigError`); `AppError` unifies them at the `ShopApp`
//! boundary so front ends handle a single type.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::session::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persistent storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// True if the error is a failed credential check rather than a fault.
    #[must_use]
    pub const fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::Auth(AuthError::InvalidCredentials))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

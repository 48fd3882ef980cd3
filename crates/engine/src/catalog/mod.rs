//! Read-only HTTP client for the public product catalog.
//!
//! # Architecture
//!
//! - Plain REST GETs against a fixed catalog host - no mutation endpoints
//! - In-memory caching via `moka` for product responses (TTL from config)
//! - Response bodies are read as text first, then parsed, so a malformed
//!   payload produces a diagnosable `Parse` error instead of a bare failure
//!
//! The client never retries on its own; a failed fetch surfaces to the
//! caller, and the front end retries only on explicit user action.

mod cache;
mod wire;

pub use wire::{ReferenceAddress, ReferenceName, ReferenceUser};

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use cartwheel_core::{Product, ProductId};

use crate::config::CatalogConfig;
use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failed (connection, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The catalog returned a non-success status.
    #[error("Catalog returned HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// A request URL could not be constructed.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the product catalog API.
///
/// Provides read-only access to products and the reference user record.
/// Product responses are cached; the reference user is fetched fresh on each
/// login attempt.
///
/// This struct is cheaply cloneable; clones share the HTTP client and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    timeout: std::time::Duration,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                timeout: config.timeout,
                cache,
            }),
        }
    }

    /// Fetch the full product listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` on transport failure or `Parse` if the
    /// response body is not a product sequence.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("product listing served from cache");
            return Ok(products.as_ref().clone());
        }

        let products: Vec<Product> = self.get_json("products").await?;

        self.inner
            .cache
            .insert(
                CacheKey::Products,
                CacheValue::Products(Arc::new(products.clone())),
            )
            .await;

        Ok(products)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this id, `Http` on
    /// transport failure, or `Parse` on a malformed body.
    #[instrument(skip(self))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!(%id, "product served from cache");
            return Ok(product.as_ref().clone());
        }

        let product: Product = self.get_json(&format!("products/{id}")).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Arc::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Fetch the reference user record used as the login credential source.
    ///
    /// Never cached: login is rare and the record is tiny.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no user has this id, `Http` on
    /// transport failure, or `Parse` on a malformed body.
    #[instrument(skip(self))]
    pub async fn fetch_reference_user(&self, id: i32) -> Result<ReferenceUser, CatalogError> {
        self.get_json(&format!("users/{id}")).await
    }

    /// Perform a GET against `path` and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(path)?;

        let response = self
            .inner
            .client
            .get(url)
            .timeout(self.inner.timeout)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_owned()));
        }
        if !status.is_success() {
            tracing::error!(%status, path, "catalog returned non-success status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        // The catalog answers 200 with an empty or null body for unknown ids.
        let body = response.text().await?;
        if body.is_empty() || body.trim() == "null" {
            return Err(CatalogError::NotFound(path.to_owned()));
        }

        match serde_json::from_str(&body) {
            Ok(decoded) => Ok(decoded),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path,
                    body = %body.chars().take(200).collect::<String>(),
                    "failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("products/999".to_string());
        assert_eq!(err.to_string(), "Not found: products/999");

        let err = CatalogError::Status { status: 502 };
        assert_eq!(err.to_string(), "Catalog returned HTTP 502");
    }

    #[test]
    fn test_cache_key_distinguishes_products() {
        assert_ne!(
            CacheKey::Product(ProductId::new(1)),
            CacheKey::Product(ProductId::new(2))
        );
        assert_eq!(CacheKey::Products, CacheKey::Products);
    }
}

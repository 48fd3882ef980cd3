//! Integration tests for Cartwheel.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//! ```
//!
//! Most tests run fully offline against a temporary data directory. Tests
//! that hit the live catalog API are `#[ignore]`d; run them with:
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - cart mutations, totals, and persistence across restarts
//! - `session_flow` - register/login/logout and session restoration

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use rust_decimal::Decimal;
use tempfile::TempDir;

use cartwheel_core::{Product, ProductId, Rating};
use cartwheel_engine::config::CatalogConfig;
use cartwheel_engine::{EngineConfig, ShopApp};

/// Engine configuration rooted at a temporary data directory.
///
/// The catalog points at the real API host; offline tests never touch it.
#[must_use]
pub fn test_config(dir: &TempDir) -> EngineConfig {
    EngineConfig {
        data_dir: dir.path().to_path_buf(),
        catalog: CatalogConfig {
            base_url: url::Url::parse("https://fakestoreapi.com").unwrap(),
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
            reference_user_id: 1,
        },
    }
}

/// Boot a fresh app over `dir`, as a front end would at startup.
pub async fn boot(dir: &TempDir) -> ShopApp {
    ShopApp::init(test_config(dir))
        .await
        .expect("Failed to initialize app")
}

/// Build a catalog-shaped product without going over the network.
#[must_use]
pub fn product(id: i32, price_cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Test Product {id}"),
        price: Decimal::new(price_cents, 2),
        description: "A product used only in tests".to_string(),
        category: "test".to_string(),
        image: format!("https://example.com/img/{id}.jpg"),
        rating: Rating {
            rate: Decimal::new(42, 1),
            count: 12,
        },
    }
}

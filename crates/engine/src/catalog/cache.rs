//! Cache types for catalog API responses.

use std::sync::Arc;

use cartwheel_core::{Product, ProductId};

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// The full product listing.
    Products,
    /// A single product by id.
    Product(ProductId),
}

/// Cached response values.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Arc<Product>),
}

//! Catalog product types.
//!
//! Products are immutable records sourced entirely from the remote catalog;
//! nothing in Cartwheel ever mutates one. Prices use decimal arithmetic so
//! cart totals never accumulate float error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// An immutable catalog product.
///
/// The field set matches the public catalog API record, which is also the
/// shape embedded in persisted cart line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the catalog's currency. Non-negative.
    pub price: Decimal,
    /// Long-form description.
    pub description: String,
    /// Category name (e.g. "electronics").
    pub category: String,
    /// URI of the product image.
    pub image: String,
    /// Aggregate customer rating.
    pub rating: Rating,
}

impl Product {
    /// Format the unit price for display, always with two decimal places.
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("{:.2}", self.price.round_dp(2))
    }
}

/// Aggregate customer rating for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating, 0-5.
    pub rate: Decimal,
    /// Number of ratings contributing to the average.
    pub count: u32,
}

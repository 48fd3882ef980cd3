//! Cart line items and the pure aggregation rules.
//!
//! A [`Cart`] is an insertion-ordered sequence of line items, at most one per
//! product. All merging, clamping, and total arithmetic lives here with no
//! I/O; the engine crate wraps these rules with snapshot persistence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// One product/quantity pairing inside a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// The catalog product this line refers to.
    pub product: Product,
    /// Units of the product. Always in `1..=Cart::MAX_LINE_QUANTITY`.
    pub quantity: u32,
}

impl CartLineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Result of adding a product to a cart.
///
/// Hitting the per-line quantity ceiling is not an error: the add still
/// succeeds with a smaller effective increment, and callers may surface the
/// `limited` flag as a "limit reached" notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// The line's quantity after the add.
    pub quantity: u32,
    /// True if the requested quantity was clamped to the ceiling.
    pub limited: bool,
}

/// An insertion-ordered shopping cart.
///
/// Invariants, upheld by every mutation:
/// - at most one line item per distinct product id
/// - every line quantity is in `1..=MAX_LINE_QUANTITY`
/// - new products append at the end; updating an existing product keeps its
///   position
///
/// Serializes transparently as a bare sequence of line items, which is the
/// persisted `@cart` snapshot shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Maximum quantity a single line item may hold.
    pub const MAX_LINE_QUANTITY: u32 = 10;

    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line item for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    /// Add `quantity` units of `product`.
    ///
    /// If a line for the product already exists its quantity becomes
    /// `min(existing + quantity, 10)` and the line keeps its position.
    /// Otherwise a new line is appended with quantity `min(quantity, 10)`,
    /// floored at 1.
    pub fn add(&mut self, product: Product, quantity: u32) -> AddOutcome {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            let requested = item.quantity.saturating_add(quantity);
            item.quantity = requested.min(Self::MAX_LINE_QUANTITY);
            return AddOutcome {
                quantity: item.quantity,
                limited: requested > Self::MAX_LINE_QUANTITY,
            };
        }

        let clamped = quantity.clamp(1, Self::MAX_LINE_QUANTITY);
        self.items.push(CartLineItem {
            product,
            quantity: clamped,
        });
        AddOutcome {
            quantity: clamped,
            limited: quantity > Self::MAX_LINE_QUANTITY,
        }
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// A quantity of zero or less removes the line. A quantity above the
    /// ceiling is clamped to 10. If no line exists for the product this is a
    /// silent no-op.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        let clamped = u32::try_from(quantity)
            .unwrap_or(Self::MAX_LINE_QUANTITY)
            .min(Self::MAX_LINE_QUANTITY);

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product_id)
        {
            item.quantity = clamped;
        }
    }

    /// Remove the line for `product_id`, if present. Idempotent.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product.id != product_id);
    }

    /// Remove all line items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of `price * quantity` over all lines, recomputed on every call.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(CartLineItem::line_price)
            .sum::<Decimal>()
            .round_dp(2)
    }

    /// The total formatted for display, always with two decimal places.
    #[must_use]
    pub fn display_total(&self) -> String {
        format!("{:.2}", self.total_price())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::product::Rating;

    fn product(id: i32, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            description: String::new(),
            category: "test".to_string(),
            image: String::new(),
            rating: Rating {
                rate: Decimal::new(40, 1),
                count: 10,
            },
        }
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        let outcome = cart.add(product(1, Decimal::new(999, 2)), 1);

        assert_eq!(outcome, AddOutcome { quantity: 1, limited: false });
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.display_total(), "9.99");
    }

    #[test]
    fn test_add_merges_existing_line() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE), 2);
        let outcome = cart.add(product(1, Decimal::ONE), 3);

        assert_eq!(outcome.quantity, 5);
        assert!(!outcome.limited);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_clamps_merge_at_ceiling() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE), 9);
        let outcome = cart.add(product(1, Decimal::ONE), 5);

        assert_eq!(outcome, AddOutcome { quantity: 10, limited: true });
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 10);
    }

    #[test]
    fn test_add_clamps_new_line() {
        let mut cart = Cart::new();
        let outcome = cart.add(product(1, Decimal::ONE), 25);

        assert_eq!(outcome, AddOutcome { quantity: 10, limited: true });
    }

    #[test]
    fn test_add_zero_quantity_floors_at_one() {
        let mut cart = Cart::new();
        let outcome = cart.add(product(1, Decimal::ONE), 0);

        assert_eq!(outcome.quantity, 1);
        assert!(!outcome.limited);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product(3, Decimal::ONE), 1);
        cart.add(product(1, Decimal::ONE), 1);
        cart.add(product(2, Decimal::ONE), 1);
        // Merging into the first line must not move it.
        cart.add(product(3, Decimal::ONE), 1);

        let ids: Vec<i32> = cart
            .items()
            .iter()
            .map(|item| item.product.id.as_i32())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_uniqueness_after_add_sequence() {
        let mut cart = Cart::new();
        for _ in 0..20 {
            cart.add(product(1, Decimal::ONE), 1);
            cart.add(product(2, Decimal::ONE), 3);
        }

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_set_quantity_exact() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE), 1);
        cart.set_quantity(ProductId::new(1), 7);

        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 7);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE), 4);
        cart.set_quantity(ProductId::new(1), 0);

        assert!(cart.line(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE), 4);
        cart.set_quantity(ProductId::new(1), -5);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_clamps_above_ceiling() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE), 1);
        cart.set_quantity(ProductId::new(1), 99);

        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 10);
    }

    #[test]
    fn test_set_quantity_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE), 2);
        let before = cart.clone();

        cart.set_quantity(ProductId::new(99), 5);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE), 2);
        let before = cart.clone();

        cart.remove(ProductId::new(99));
        assert_eq!(cart, before);

        cart.remove(ProductId::new(1));
        cart.remove(ProductId::new(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::ONE), 2);
        cart.add(product(2, Decimal::ONE), 2);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.display_total(), "0.00");
    }

    #[test]
    fn test_totals_recomputed_fresh() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::new(1050, 2)), 2);
        cart.add(product(2, Decimal::new(399, 2)), 3);

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), Decimal::new(3297, 2));

        cart.remove(ProductId::new(2));
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), Decimal::new(2100, 2));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut cart = Cart::new();
        cart.add(product(1, Decimal::new(999, 2)), 2);
        cart.add(product(2, Decimal::new(4550, 2)), 10);

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);

        // The snapshot is a bare sequence, not an object wrapper.
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_empty_snapshot_roundtrip() {
        let cart = Cart::new();
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, "[]");

        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_empty());
    }
}

//! The cart engine: in-memory cart plus snapshot persistence.

use tracing::{debug, instrument};

use cartwheel_core::{AddOutcome, Cart, Product, ProductId};

use crate::storage::{JsonStore, StorageError, keys};

/// Owns the authoritative in-memory [`Cart`] and keeps the persistent store
/// synchronized with every mutation.
///
/// Mutations are transactional with respect to memory: the next cart state is
/// computed first, the full snapshot is persisted, and only on a successful
/// write does the in-memory cart advance. A failed write leaves both sides at
/// the pre-mutation state.
///
/// The service is the sole writer of the cart storage key; front ends must
/// not write it directly.
pub struct CartService {
    store: JsonStore,
    cart: Cart,
}

impl CartService {
    /// Create a cart engine over `store`, starting empty.
    ///
    /// Call [`load`](Self::load) to pick up a persisted snapshot.
    #[must_use]
    pub const fn new(store: JsonStore) -> Self {
        Self {
            store,
            cart: Cart::new(),
        }
    }

    /// The current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Replace in-memory state with the persisted snapshot.
    ///
    /// An absent or malformed snapshot initializes an empty cart. Does not
    /// write back.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if device storage cannot be read.
    pub async fn load(&mut self) -> Result<(), StorageError> {
        self.cart = self.store.get(keys::CART).await?.unwrap_or_default();
        debug!(lines = self.cart.len(), "cart loaded from storage");
        Ok(())
    }

    /// Add `quantity` units of `product`, merging into an existing line and
    /// clamping at the per-line ceiling.
    ///
    /// A clamped add is still a success; the returned [`AddOutcome`] carries
    /// the `limited` flag for the caller to surface.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be persisted; the
    /// in-memory cart is left unchanged in that case.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(
        &mut self,
        product: Product,
        quantity: u32,
    ) -> Result<AddOutcome, StorageError> {
        let mut next = self.cart.clone();
        let outcome = next.add(product, quantity);
        self.commit(next).await?;

        debug!(
            quantity = outcome.quantity,
            limited = outcome.limited,
            "line added to cart"
        );
        Ok(outcome)
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// A quantity of zero or less removes the line; a quantity above the
    /// ceiling is clamped; an absent id is a silent no-op. The snapshot is
    /// persisted in every case.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be persisted.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), StorageError> {
        let mut next = self.cart.clone();
        next.set_quantity(product_id, quantity);
        self.commit(next).await
    }

    /// Remove the line for `product_id`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be persisted.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, product_id: ProductId) -> Result<(), StorageError> {
        let mut next = self.cart.clone();
        next.remove(product_id);
        self.commit(next).await
    }

    /// Empty the cart and persist an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be persisted.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> Result<(), StorageError> {
        self.commit(Cart::new()).await
    }

    /// Persist `next` and, on success, make it the in-memory state.
    async fn commit(&mut self, next: Cart) -> Result<(), StorageError> {
        self.store.set(keys::CART, &next).await?;
        self.cart = next;
        Ok(())
    }
}

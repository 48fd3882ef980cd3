//! Cart commands.
//!
//! Each mutating command fetches any product data it needs, applies the
//! mutation through [`ShopApp`], and reports the resulting totals. The engine
//! persists after every mutation, so a following invocation sees the change.

use tracing::{info, warn};

use cartwheel_core::ProductId;
use cartwheel_engine::ShopApp;

/// Add a product to the cart by catalog id.
pub async fn add(
    app: &mut ShopApp,
    id: i32,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = app.catalog().fetch_product(ProductId::new(id)).await?;
    let title = product.title.clone();

    let outcome = app.cart_mut().add(product, quantity).await?;
    if outcome.limited {
        warn!(
            "Quantity limited to {} for \"{title}\"",
            outcome.quantity
        );
    } else {
        info!("Added \"{title}\" x{} to cart", outcome.quantity);
    }

    totals(app);
    Ok(())
}

/// Print the cart contents and totals.
pub fn show(app: &ShopApp) {
    let cart = app.cart().cart();
    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    for line in cart.items() {
        info!(
            "#{} {} x{} = {}",
            line.product.id,
            line.product.title,
            line.quantity,
            line.line_price().round_dp(2)
        );
    }
    totals(app);
}

/// Set the quantity of a cart line. Zero removes the line.
pub async fn update(
    app: &mut ShopApp,
    id: i32,
    quantity: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    app.cart_mut().set_quantity(ProductId::new(id), quantity).await?;
    info!("Updated product {id} to quantity {quantity}");
    totals(app);
    Ok(())
}

/// Remove a cart line.
pub async fn remove(app: &mut ShopApp, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    app.cart_mut().remove(ProductId::new(id)).await?;
    info!("Removed product {id} from cart");
    totals(app);
    Ok(())
}

/// Empty the cart.
pub async fn clear(app: &mut ShopApp) -> Result<(), Box<dyn std::error::Error>> {
    app.cart_mut().clear().await?;
    info!("Cart cleared");
    Ok(())
}

/// Checkout is not wired to a payment flow; report the would-be order total.
pub fn checkout(app: &ShopApp) {
    let cart = app.cart().cart();
    if cart.is_empty() {
        info!("Nothing to check out");
        return;
    }
    info!(
        "Checkout not available yet; order would total {} for {} items",
        cart.display_total(),
        cart.total_items()
    );
}

fn totals(app: &ShopApp) {
    let cart = app.cart().cart();
    info!(
        "Cart: {} items, total {}",
        cart.total_items(),
        cart.display_total()
    );
}

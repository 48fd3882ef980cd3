//! Catalog browsing commands.

use tracing::info;

use cartwheel_core::ProductId;
use cartwheel_engine::ShopApp;

/// List every product in the catalog.
pub async fn list(app: &ShopApp) -> Result<(), Box<dyn std::error::Error>> {
    let products = app.catalog().fetch_products().await?;
    info!("{} products", products.len());

    for product in &products {
        info!(
            "#{} {} - {} ({})",
            product.id,
            product.title,
            product.display_price(),
            product.category
        );
    }
    Ok(())
}

/// Show one product in full.
pub async fn show(app: &ShopApp, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let product = app.catalog().fetch_product(ProductId::new(id)).await?;

    info!("#{} {}", product.id, product.title);
    info!("Price:    {}", product.display_price());
    info!("Category: {}", product.category);
    info!(
        "Rating:   {} ({} reviews)",
        product.rating.rate, product.rating.count
    );
    info!("{}", product.description);
    Ok(())
}

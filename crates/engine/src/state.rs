//! Application state: the `ShopApp` context object.
//!
//! Front ends hold exactly one `ShopApp` and route every read and mutation
//! through it. There is no ambient singleton: construction via
//! [`ShopApp::init`] is the defined initialization point, and
//! [`ShopApp::logout`] is the defined teardown.

use tracing::instrument;

use cartwheel_core::User;

use crate::catalog::CatalogClient;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::services::cart::CartService;
use crate::services::session::{LoginForm, RegisterForm, SessionService};
use crate::storage::JsonStore;

/// The engine's single entry point, owning the catalog client, the cart
/// engine, and the session state over one shared store.
pub struct ShopApp {
    config: EngineConfig,
    catalog: CatalogClient,
    cart: CartService,
    session: SessionService,
}

impl ShopApp {
    /// Initialize the application state: open the store, restore the
    /// persisted session, and load the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or read.
    pub async fn init(config: EngineConfig) -> Result<Self> {
        let store = JsonStore::open(&config.data_dir).await?;
        let catalog = CatalogClient::new(&config.catalog);

        let mut session = SessionService::new(store.clone());
        session.restore().await?;

        let mut cart = CartService::new(store);
        cart.load().await?;

        Ok(Self {
            config,
            catalog,
            cart,
            session,
        })
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The product catalog client.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// The cart engine, read-only.
    #[must_use]
    pub const fn cart(&self) -> &CartService {
        &self.cart
    }

    /// The cart engine, for mutations.
    pub const fn cart_mut(&mut self) -> &mut CartService {
        &mut self.cart
    }

    /// The session state, read-only.
    #[must_use]
    pub const fn session(&self) -> &SessionService {
        &self.session
    }

    /// Attempt a login.
    ///
    /// Fetches the reference user record from the catalog, then delegates the
    /// credential check and persistence to the session service.
    ///
    /// # Errors
    ///
    /// Returns a catalog error if the reference record cannot be fetched, or
    /// an auth error on mismatched credentials.
    #[instrument(skip(self, form))]
    pub async fn login(&mut self, form: &LoginForm) -> Result<&User> {
        let reference = self
            .catalog
            .fetch_reference_user(self.config.catalog.reference_user_id)
            .await?;

        let user = self.session.login(&reference, form).await?;
        Ok(user)
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns an auth error describing the first failing form constraint.
    #[instrument(skip(self, form))]
    pub async fn register(&mut self, form: &RegisterForm) -> Result<&User> {
        let user = self.session.register(form).await?;
        Ok(user)
    }

    /// Log out: tear down the session and clear the session-scoped cart.
    ///
    /// # Errors
    ///
    /// Returns a storage error if either removal fails.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<()> {
        self.session.logout().await?;
        self.cart.clear().await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::services::session::RegisterForm;
    use std::time::Duration;

    fn test_config(data_dir: &std::path::Path) -> EngineConfig {
        EngineConfig {
            data_dir: data_dir.to_path_buf(),
            catalog: CatalogConfig {
                base_url: url::Url::parse("https://fakestoreapi.com").unwrap(),
                timeout: Duration::from_secs(10),
                cache_ttl: Duration::from_secs(300),
                reference_user_id: 1,
            },
        }
    }

    fn register_form() -> RegisterForm {
        RegisterForm {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "hunter42".to_string(),
            confirm_password: "hunter42".to_string(),
            address: "7 Elm Street".to_string(),
            image_uri: None,
        }
    }

    #[tokio::test]
    async fn test_init_starts_unauthenticated_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let app = ShopApp::init(test_config(dir.path())).await.unwrap();

        assert!(!app.session().is_authenticated());
        assert!(app.cart().cart().is_empty());
    }

    #[tokio::test]
    async fn test_register_then_restart_restores_session() {
        let dir = tempfile::tempdir().unwrap();

        let mut app = ShopApp::init(test_config(dir.path())).await.unwrap();
        app.register(&register_form()).await.unwrap();
        assert!(app.session().is_authenticated());
        drop(app);

        let app = ShopApp::init(test_config(dir.path())).await.unwrap();
        assert!(app.session().is_authenticated());
        assert_eq!(app.session().current_user().unwrap().full_name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_logout_clears_cart_across_restart() {
        use cartwheel_core::{Product, ProductId, Rating};
        use rust_decimal::Decimal;

        let dir = tempfile::tempdir().unwrap();
        let mut app = ShopApp::init(test_config(dir.path())).await.unwrap();

        app.register(&register_form()).await.unwrap();
        app.cart_mut()
            .add(
                Product {
                    id: ProductId::new(1),
                    title: "Backpack".to_string(),
                    price: Decimal::new(999, 2),
                    description: String::new(),
                    category: "bags".to_string(),
                    image: String::new(),
                    rating: Rating {
                        rate: Decimal::new(40, 1),
                        count: 1,
                    },
                },
                2,
            )
            .await
            .unwrap();
        assert_eq!(app.cart().cart().total_items(), 2);

        app.logout().await.unwrap();
        drop(app);

        let app = ShopApp::init(test_config(dir.path())).await.unwrap();
        assert!(!app.session().is_authenticated());
        assert!(app.cart().cart().is_empty());
    }
}

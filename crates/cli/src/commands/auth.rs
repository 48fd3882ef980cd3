//! Session commands: login, register, logout, profile.

use tracing::{info, warn};

use cartwheel_engine::{LoginForm, RegisterForm, ShopApp};

/// Attempt a login with the given credentials.
pub async fn login(
    app: &mut ShopApp,
    email: String,
    password: String,
    remember: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = LoginForm {
        email,
        password,
        remember_me: remember,
    };

    match app.login(&form).await {
        Ok(user) => {
            info!("Logged in as {} <{}>", user.full_name, user.email);
            Ok(())
        }
        Err(e) if e.is_invalid_credentials() => {
            warn!("Invalid email or password");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Register a new user and start their session.
pub async fn register(
    app: &mut ShopApp,
    full_name: String,
    email: String,
    password: String,
    address: String,
    image: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = RegisterForm {
        full_name,
        email,
        confirm_password: password.clone(),
        password,
        address,
        image_uri: image,
    };

    let user = app.register(&form).await?;
    info!("Registered {} <{}>", user.full_name, user.email);
    Ok(())
}

/// Log out and clear the cart.
pub async fn logout(app: &mut ShopApp) -> Result<(), Box<dyn std::error::Error>> {
    if !app.session().is_authenticated() {
        info!("Not logged in");
        return Ok(());
    }
    app.logout().await?;
    info!("Logged out");
    Ok(())
}

/// Print the current user profile.
pub fn profile(app: &ShopApp) {
    let Some(user) = app.session().current_user() else {
        info!("Not logged in");
        return;
    };

    info!("Name:    {}", user.full_name);
    info!("Email:   {}", user.email);
    info!("Address: {}", user.address);
    if let Some(uri) = &user.image_uri {
        info!("Image:   {uri}");
    }
    info!("Since:   {}", user.created_at.format("%Y-%m-%d"));
    if app.session().flags().remember_me {
        info!("Session will be remembered across restarts");
    }
}

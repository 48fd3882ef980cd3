//! Cartwheel CLI - browse the catalog, manage the cart, manage the session.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! cartwheel products
//! cartwheel product 1
//!
//! # Manage the cart
//! cartwheel cart add 1 --quantity 2
//! cartwheel cart show
//! cartwheel cart update 1 5
//! cartwheel cart remove 1
//! cartwheel cart clear
//!
//! # Manage the session
//! cartwheel login -e john@gmail.com -p test123 --remember
//! cartwheel register -n "Jane Doe" -e jane@example.com -p hunter42 -a "7 Elm Street"
//! cartwheel profile
//! cartwheel logout
//! ```
//!
//! State persists under `CARTWHEEL_DATA_DIR` (default `.cartwheel`), so the
//! cart and session survive across invocations the way they survive app
//! restarts on device.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use cartwheel_engine::{EngineConfig, ShopApp};

mod commands;

#[derive(Parser)]
#[command(name = "cartwheel")]
#[command(author, version, about = "Cartwheel shopping engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products,
    /// Show a single product
    Product {
        /// Catalog product id
        id: i32,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Log in with the test credentials
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Stay signed in across restarts
        #[arg(long)]
        remember: bool,
    },
    /// Register a new local user
    Register {
        /// Full name
        #[arg(short = 'n', long)]
        full_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Postal address
        #[arg(short, long)]
        address: String,

        /// Profile image URI
        #[arg(long)]
        image: Option<String>,
    },
    /// Log out and clear the cart
    Logout,
    /// Show the current user profile
    Profile,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Catalog product id
        id: i32,

        /// Units to add
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Show the cart contents and totals
    Show,
    /// Set the quantity of a cart line (0 removes it)
    Update {
        /// Catalog product id
        id: i32,

        /// New quantity
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        id: i32,
    },
    /// Empty the cart
    Clear,
    /// Pretend to check out (not implemented; prints the would-be total)
    Checkout,
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter; default to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel=info,cartwheel_engine=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let mut app = ShopApp::init(config).await?;

    match cli.command {
        Commands::Products => commands::catalog::list(&app).await?,
        Commands::Product { id } => commands::catalog::show(&app, id).await?,
        Commands::Cart { action } => match action {
            CartAction::Add { id, quantity } => {
                commands::cart::add(&mut app, id, quantity).await?;
            }
            CartAction::Show => commands::cart::show(&app),
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut app, id, quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut app, id).await?,
            CartAction::Clear => commands::cart::clear(&mut app).await?,
            CartAction::Checkout => commands::cart::checkout(&app),
        },
        Commands::Login {
            email,
            password,
            remember,
        } => commands::auth::login(&mut app, email, password, remember).await?,
        Commands::Register {
            full_name,
            email,
            password,
            address,
            image,
        } => {
            commands::auth::register(&mut app, full_name, email, password, address, image).await?;
        }
        Commands::Logout => commands::auth::logout(&mut app).await?,
        Commands::Profile => commands::auth::profile(&app),
    }
    Ok(())
}

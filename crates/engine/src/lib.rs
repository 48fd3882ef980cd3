//! Cartwheel Engine - cart aggregation and local session state.
//!
//! This crate is the authoritative mutation surface for everything the app
//! persists: the shopping cart, the current user, and the session flags.
//! Front ends (the CLI, a future GUI) call into [`state::ShopApp`] and never
//! touch storage keys directly.
//!
//! # Architecture
//!
//! - [`storage`] - durable JSON key-value store, full-snapshot writes
//! - [`catalog`] - read-only HTTP client for the public product catalog
//! - [`services`] - the cart engine and session state built on both
//! - [`state`] - the `ShopApp` context object wiring it all together
//!
//! Every mutating cart or session operation follows the same cycle: compute
//! the next state in memory, persist the full snapshot, and only commit the
//! in-memory state once the write succeeded. A failed write therefore leaves
//! memory and disk consistent at the pre-mutation state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod storage;

pub use catalog::{CatalogClient, CatalogError};
pub use config::{ConfigError, EngineConfig};
pub use error::{AppError, Result};
pub use services::cart::CartService;
pub use services::session::{AuthError, LoginForm, RegisterForm, SessionService};
pub use state::ShopApp;
pub use storage::{JsonStore, StorageError};

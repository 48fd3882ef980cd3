//! Core types for Cartwheel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod product;
pub mod user;

pub use cart::{AddOutcome, Cart, CartLineItem};
pub use email::{Email, EmailError};
pub use id::*;
pub use product::{Product, Rating};
pub use user::{SessionFlags, User};

//! Cartwheel Core - Shared types library.
//!
//! This crate provides the common types used across all Cartwheel components:
//! - `engine` - Cart engine, session state, storage, and catalog client
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain rules - no I/O, no
//! storage access, no HTTP clients. The cart aggregation rules (line merging,
//! quantity clamping, totals) live here so they can be tested without any
//! persistence in the loop.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, emails, products, cart lines, and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Engine services.
//!
//! The cart engine and session state. Each service owns its slice of
//! in-memory state and is the sole writer of its storage keys.

pub mod cart;
pub mod session;

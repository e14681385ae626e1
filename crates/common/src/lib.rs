//! PizzaFun Common Utilities
//!
//! Shared infrastructure for all PizzaFun crates:
//! - Error types and result aliases
//! - Injectable clocks and frame pacing
//! - Injectable random sources for cosmetic effects
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod random;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use random::*;

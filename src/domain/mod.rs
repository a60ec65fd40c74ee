//! Domain layer for Buildlight
//!
//! Builder states, build outcomes, the color table and the ports the
//! poller drives.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{LightError, ProviderError};

//! Philips Hue bridge integration
//!
//! Implements [`crate::domain::ports::LightController`] over the bridge's
//! REST API.

pub mod client;
pub mod types;

pub use client::{HueClient, HueClientConfig};

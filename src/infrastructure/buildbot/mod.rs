//! Buildbot build master integration
//!
//! Implements [`crate::domain::ports::BuildStatusProvider`] over the JSON
//! status API (`/json/builders/...`).

pub mod client;
pub mod types;

pub use client::{BuildbotClient, BuildbotClientConfig};
pub use types::BuilderResponse;

//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Buildbot JSON status API client
//! - Philips Hue bridge client
//! - Configuration management
//! - Logging infrastructure
//! - Interrupt signal handling
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod buildbot;
pub mod config;
pub mod hue;
pub mod logging;
pub mod signal;

//! `run`: load configuration, wire the clients and poll until interrupted.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::models::Config;
use crate::domain::ports::LightController;
use crate::infrastructure::buildbot::BuildbotClient;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::hue::HueClient;
use crate::infrastructure::logging::{parse_log_level, LoggerImpl};
use crate::infrastructure::signal::cancel_on_interrupt;
use crate::services::{ColorMapper, OutcomeClassifier, PollerSettings, StatusPoller};

/// Load and validate the configuration, applying a `--log` override.
///
/// Any failure here is fatal: polling never starts with an incomplete
/// configuration.
pub fn prepare_config(config_path: Option<&Path>, log_level: Option<&str>) -> Result<Config> {
    let mut config = ConfigLoader::load(config_path)?;

    if let Some(level) = log_level {
        parse_log_level(level)?;
        config.logging.level = level.to_lowercase();
    }

    Ok(config)
}

/// Build a poller wired to the Buildbot and Hue clients described by `config`.
pub fn build_poller(config: &Config, cancel: CancellationToken) -> Result<StatusPoller> {
    let provider = BuildbotClient::with_config((&config.buildmaster).into())
        .context("Failed to create build master client")?;
    let light = HueClient::with_config((&config.hue).into())
        .context("Failed to create Hue bridge client")?;

    debug!(colors = ?light.supported_colors(), "light supports colors");

    Ok(StatusPoller::new(
        Arc::new(provider),
        Arc::new(light),
        OutcomeClassifier::from_config(&config.classifier),
        ColorMapper::new(config.color_state_matcher.clone()),
        PollerSettings::from_config(config),
        cancel,
    ))
}

/// Run the poller until Ctrl-C.
pub async fn execute(config_path: Option<&Path>, log_level: Option<&str>) -> Result<()> {
    let config = prepare_config(config_path, log_level)?;
    let _logger = LoggerImpl::init(&config.logging)?;
    ConfigLoader::log_effective(&config);

    let cancel = CancellationToken::new();
    let mut poller = build_poller(&config, cancel.clone())?;
    let listener = cancel_on_interrupt(cancel.clone());

    poller.run().await;

    cancel.cancel();
    listener.await.context("Interrupt listener failed")?;
    Ok(())
}

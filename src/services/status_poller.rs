//! Builder poll loop.
//!
//! Each cycle fetches the builder state once and compares it with the cached
//! state. Only a change triggers work: `building` maps straight to a color,
//! `idle` is resolved to the outcome of the highest-numbered cached build.
//! The light is touched at most once per cycle and never while the state is
//! unchanged.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::error::ProviderError;
use crate::domain::models::{
    latest_build_id, BuildId, BuilderState, Config, JobOutcome, LightColor,
};
use crate::domain::ports::{BuildStatusProvider, LightController};
use crate::services::color_mapper::ColorMapper;
use crate::services::outcome_classifier::OutcomeClassifier;

/// What the poller watches and drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerSettings {
    /// Builder name on the build master
    pub job: String,
    /// Light name on the bridge
    pub light: String,
    /// Sleep between cycles
    pub interval: Duration,
}

impl PollerSettings {
    /// Create settings for `job` and `light` with the default 4 second interval
    pub fn new(job: impl Into<String>, light: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            light: light.into(),
            interval: Duration::from_secs(4),
        }
    }

    /// Replace the poll interval
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Derive settings from a validated configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.buildmaster.builder, &config.hue.light_name)
            .with_interval(Duration::from_secs(config.poller.interval_in_sec))
    }
}

/// Result of a single poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Observed state matched the cached state; nothing was done
    Unchanged(BuilderState),
    /// The cached state changed
    Transitioned {
        /// Previously cached state
        from: BuilderState,
        /// Newly cached state
        to: BuilderState,
        /// Color sent to the light, if any
        color: Option<LightColor>,
    },
}

/// Edge-triggered poller mirroring one builder onto one light.
pub struct StatusPoller {
    provider: Arc<dyn BuildStatusProvider>,
    light: Arc<dyn LightController>,
    classifier: OutcomeClassifier,
    mapper: ColorMapper,
    settings: PollerSettings,
    cached: BuilderState,
    last_failure: Option<String>,
    cancel: CancellationToken,
}

impl fmt::Debug for StatusPoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusPoller")
            .field("settings", &self.settings)
            .field("cached", &self.cached)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl StatusPoller {
    /// Create a poller.
    ///
    /// The cached state starts as [`BuilderState::Unknown`], so the first
    /// successful observation always counts as a transition.
    pub fn new(
        provider: Arc<dyn BuildStatusProvider>,
        light: Arc<dyn LightController>,
        classifier: OutcomeClassifier,
        mapper: ColorMapper,
        settings: PollerSettings,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            provider,
            light,
            classifier,
            mapper,
            settings,
            cached: BuilderState::Unknown,
            last_failure: None,
            cancel,
        }
    }

    /// Seed the cached state
    #[must_use]
    pub const fn with_initial_state(mut self, state: BuilderState) -> Self {
        self.cached = state;
        self
    }

    /// Currently cached builder state
    pub const fn cached_state(&self) -> BuilderState {
        self.cached
    }

    /// Poll until the cancellation token fires.
    ///
    /// Cancellation is observed before each cycle and while sleeping; a
    /// request already in flight runs to completion.
    pub async fn run(&mut self) {
        info!(
            job = %self.settings.job,
            light = %self.settings.light,
            interval_secs = self.settings.interval.as_secs_f64(),
            "starting builder poller"
        );

        while !self.cancel.is_cancelled() {
            self.poll_once().await;

            tokio::select! {
                () = self.cancel.cancelled() => break,
                () = tokio::time::sleep(self.settings.interval) => {}
            }
        }

        info!(job = %self.settings.job, "builder poller stopped");
    }

    /// Run a single cycle without sleeping.
    #[instrument(skip_all, fields(job = %self.settings.job))]
    pub async fn poll_once(&mut self) -> PollOutcome {
        let observed = match self.provider.builder_state(&self.settings.job).await {
            Ok(state) => state,
            Err(err) => {
                self.record_failure("fetching builder state", &err);
                BuilderState::Unknown
            }
        };

        if observed == self.cached {
            debug!(state = %observed, "builder state unchanged");
            return PollOutcome::Unchanged(observed);
        }

        let from = self.cached;
        info!(%from, to = %observed, "builder state changed");

        let (to, color) = match observed {
            BuilderState::Building => (observed, self.mapper.color_for(observed)),
            BuilderState::Idle => match self.resolve_last_outcome().await {
                Ok(Some((_, outcome))) => (observed, self.mapper.color_for(outcome)),
                Ok(None) => (observed, None),
                Err(err) => {
                    self.record_failure("resolving last build", &err);
                    (BuilderState::Unknown, None)
                }
            },
            BuilderState::Unknown => (observed, None),
        };

        if let Some(color) = color {
            self.update_light(color).await;
        }

        self.cached = to;
        if to != BuilderState::Unknown {
            self.last_failure = None;
        }
        PollOutcome::Transitioned { from, to, color }
    }

    async fn resolve_last_outcome(&self) -> Result<Option<(BuildId, JobOutcome)>, ProviderError> {
        let job = &self.settings.job;
        let ids = self.provider.build_ids(job).await?;

        let Some(build_id) = latest_build_id(&ids) else {
            warn!("builder has no cached builds; leaving light unchanged");
            return Ok(None);
        };
        info!(build_id, "last cached build");

        let detail = self.provider.build_detail(job, build_id).await?;
        let outcome = self.classifier.classify(&detail);
        info!(build_id, %outcome, "last cached build outcome");

        Ok(Some((build_id, outcome)))
    }

    async fn update_light(&self, color: LightColor) {
        let light = &self.settings.light;
        info!(%light, %color, "updating light");

        if let Err(err) = self.light.set_light_color(light, color).await {
            error!(%light, %color, error = %err, "failed to update light");
        }
    }

    /// Log a failed fetch, at `warn` only the first time a given failure is seen.
    fn record_failure(&mut self, context: &str, err: &ProviderError) {
        let message = format!("{context}: {err}");
        let repeated = self.cached == BuilderState::Unknown
            && self.last_failure.as_deref() == Some(message.as_str());

        if repeated {
            debug!(error = %message, "poll still failing");
        } else {
            warn!(error = %message, "poll failed; treating builder state as unknown");
        }

        self.last_failure = Some(message);
    }
}

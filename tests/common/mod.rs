//! Common test utilities for integration tests
//!
//! Provides in-memory fakes of the build master and the light, plus shared
//! fixtures used across multiple integration test files.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use buildlight::domain::models::{BuildDetail, BuildId, BuildStep, BuilderState, LightColor};
use buildlight::domain::ports::{BuildStatusProvider, LightController};
use buildlight::services::{ColorMapper, OutcomeClassifier, PollerSettings, StatusPoller};
use buildlight::{LightError, ProviderError};

/// One scripted answer to `builder_state`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Observation {
    /// Answer with this state
    State(BuilderState),
    /// Fail with an HTTP error of this status
    Failure(u16),
}

/// Build master fake answering `builder_state` from a script.
///
/// Once the script is exhausted the last answer repeats and the optional
/// cancellation token fires, which lets `StatusPoller::run` tests terminate.
#[derive(Default)]
pub struct FakeProvider {
    script: Mutex<VecDeque<Observation>>,
    last: Mutex<Option<Observation>>,
    build_ids: Mutex<Vec<BuildId>>,
    details: Mutex<HashMap<BuildId, BuildDetail>>,
    fail_build_lookup: AtomicBool,
    calls: Mutex<Vec<String>>,
    on_exhausted: Option<CancellationToken>,
}

#[allow(dead_code)]
impl FakeProvider {
    pub fn new(script: impl IntoIterator<Item = Observation>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn states(states: impl IntoIterator<Item = BuilderState>) -> Self {
        Self::new(states.into_iter().map(Observation::State))
    }

    pub fn cancel_when_exhausted(mut self, token: CancellationToken) -> Self {
        self.on_exhausted = Some(token);
        self
    }

    pub fn with_build(self, id: BuildId, detail: BuildDetail) -> Self {
        self.build_ids.lock().unwrap().push(id);
        self.details.lock().unwrap().insert(id, detail);
        self
    }

    pub fn with_build_ids(self, ids: &[BuildId]) -> Self {
        self.build_ids.lock().unwrap().extend_from_slice(ids);
        self
    }

    pub fn set_fail_build_lookup(&self, fail: bool) {
        self.fail_build_lookup.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted_failure(status: u16) -> ProviderError {
        ProviderError::Http {
            status,
            body: "scripted failure".to_string(),
        }
    }
}

#[async_trait]
impl BuildStatusProvider for FakeProvider {
    async fn builder_state(&self, _job: &str) -> Result<BuilderState, ProviderError> {
        self.record("state".to_string());

        let next = {
            let mut script = self.script.lock().unwrap();
            let next = script.pop_front();
            if script.is_empty() {
                if let Some(token) = &self.on_exhausted {
                    token.cancel();
                }
            }
            next
        };

        let observation = {
            let mut last = self.last.lock().unwrap();
            if next.is_some() {
                *last = next;
            }
            last.unwrap_or(Observation::State(BuilderState::Unknown))
        };

        match observation {
            Observation::State(state) => Ok(state),
            Observation::Failure(status) => Err(Self::scripted_failure(status)),
        }
    }

    async fn build_ids(&self, _job: &str) -> Result<Vec<BuildId>, ProviderError> {
        self.record("ids".to_string());
        if self.fail_build_lookup.load(Ordering::SeqCst) {
            return Err(Self::scripted_failure(503));
        }
        Ok(self.build_ids.lock().unwrap().clone())
    }

    async fn build_detail(
        &self,
        _job: &str,
        build_id: BuildId,
    ) -> Result<BuildDetail, ProviderError> {
        self.record(format!("detail:{build_id}"));
        self.details
            .lock()
            .unwrap()
            .get(&build_id)
            .cloned()
            .ok_or_else(|| Self::scripted_failure(404))
    }
}

/// Light fake recording every color it is asked to show.
#[derive(Default)]
pub struct RecordingLight {
    updates: Mutex<Vec<(String, LightColor)>>,
    fail: AtomicBool,
}

#[allow(dead_code)]
impl RecordingLight {
    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Default::default()
        }
    }

    pub fn colors(&self) -> Vec<LightColor> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|(_, color)| *color)
            .collect()
    }

    pub fn updates(&self) -> Vec<(String, LightColor)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl LightController for RecordingLight {
    async fn set_light_color(&self, light: &str, color: LightColor) -> Result<(), LightError> {
        self.updates.lock().unwrap().push((light.to_string(), color));
        if self.fail.load(Ordering::SeqCst) {
            return Err(LightError::LightNotFound(light.to_string()));
        }
        Ok(())
    }

    fn supported_colors(&self) -> Vec<LightColor> {
        LightColor::ALL.to_vec()
    }
}

/// Build record with the given overall tags and steps
#[allow(dead_code)]
pub fn build(number: BuildId, text: &[&str], steps: Vec<BuildStep>) -> BuildDetail {
    BuildDetail {
        number: Some(number),
        text: text.iter().map(|t| (*t).to_string()).collect(),
        steps,
    }
}

/// Successful build record
#[allow(dead_code)]
pub fn successful_build(number: BuildId) -> BuildDetail {
    build(
        number,
        &["build", "successful"],
        vec![BuildStep::new("make_package_compile", &["compile"])],
    )
}

/// Poller over the fakes, job `nightly`, light `desk`, 1 ms interval
#[allow(dead_code)]
pub fn poller(
    provider: &Arc<FakeProvider>,
    light: &Arc<RecordingLight>,
    cancel: CancellationToken,
) -> StatusPoller {
    StatusPoller::new(
        provider.clone(),
        light.clone(),
        OutcomeClassifier::default(),
        ColorMapper::default(),
        PollerSettings::new("nightly", "desk").with_interval(Duration::from_millis(1)),
        cancel,
    )
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

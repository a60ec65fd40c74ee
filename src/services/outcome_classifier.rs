//! Classification of finished builds.
//!
//! A build whose overall tags lack `failed` is a success. Otherwise the steps
//! are scanned in the order supplied and the first step carrying `failed`
//! together with the compile tag or one of the test tags decides the outcome.
//! Later failing steps are never consulted.

use tracing::debug;

use crate::domain::models::{BuildDetail, ClassifierConfig, JobOutcome};

const FAILED_TAG: &str = "failed";

/// Derives a [`JobOutcome`] from a build detail record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeClassifier {
    compile_tag: String,
    test_tags: Vec<String>,
}

impl Default for OutcomeClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

impl OutcomeClassifier {
    /// Create a classifier with explicit compile and test tags
    pub fn new(compile_tag: impl Into<String>, test_tags: Vec<String>) -> Self {
        Self {
            compile_tag: compile_tag.into(),
            test_tags,
        }
    }

    /// Create a classifier from the `classifier` configuration section
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.compile_tag.clone(), config.test_tags.clone())
    }

    /// Classify a finished build.
    ///
    /// Pure: the same record always yields the same outcome.
    pub fn classify(&self, detail: &BuildDetail) -> JobOutcome {
        if !detail.has_tag(FAILED_TAG) {
            return JobOutcome::Success;
        }

        debug!(build_id = ?detail.number, "builder failure detected");

        for step in &detail.steps {
            if step.has_tags(&[FAILED_TAG, &self.compile_tag]) {
                return JobOutcome::CompileFailed;
            }

            if self
                .test_tags
                .iter()
                .any(|tag| step.has_tags(&[FAILED_TAG, tag]))
            {
                return JobOutcome::TestFailed;
            }
        }

        JobOutcome::UnknownFailed
    }
}

//! End-to-end poll loop scenarios against in-memory fakes.

mod common;

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use buildlight::domain::models::{BuildStep, BuilderState, ColorTable, LightColor};
use buildlight::services::{ColorMapper, OutcomeClassifier, PollOutcome, PollerSettings, StatusPoller};
use common::{build, poller, successful_build, FakeProvider, Observation, RecordingLight};

#[tokio::test]
async fn test_idle_building_idle_issues_two_updates_in_order() {
    common::setup_test_logging();
    let provider = Arc::new(
        FakeProvider::states([BuilderState::Building, BuilderState::Idle])
            .with_build_ids(&[12, 7, 3])
            .with_build(19, successful_build(19)),
    );
    let light = Arc::new(RecordingLight::default());
    let mut poller =
        poller(&provider, &light, CancellationToken::new()).with_initial_state(BuilderState::Idle);

    poller.poll_once().await;
    poller.poll_once().await;

    assert_eq!(light.colors(), vec![LightColor::Red, LightColor::Green]);
    assert_eq!(
        light.updates()[0].0, "desk",
        "updates go to the configured light"
    );
    assert_eq!(provider.count_calls("detail:19"), 1, "highest build id is inspected");
    assert_eq!(provider.count_calls("detail:"), 1);
}

#[tokio::test]
async fn test_idle_idle_issues_no_update() {
    let provider = Arc::new(
        FakeProvider::states([BuilderState::Idle]).with_build(19, successful_build(19)),
    );
    let light = Arc::new(RecordingLight::default());
    let mut poller =
        poller(&provider, &light, CancellationToken::new()).with_initial_state(BuilderState::Idle);

    let outcome = poller.poll_once().await;

    assert_eq!(outcome, PollOutcome::Unchanged(BuilderState::Idle));
    assert!(light.colors().is_empty());
    assert_eq!(provider.count_calls("ids"), 0, "no build lookup without a transition");
}

#[tokio::test]
async fn test_repeated_state_updates_light_once() {
    let provider = Arc::new(FakeProvider::states([
        BuilderState::Building,
        BuilderState::Building,
        BuilderState::Building,
    ]));
    let light = Arc::new(RecordingLight::default());
    let mut poller = poller(&provider, &light, CancellationToken::new());

    for _ in 0..3 {
        poller.poll_once().await;
    }

    assert_eq!(light.colors(), vec![LightColor::Red]);
    assert_eq!(poller.cached_state(), BuilderState::Building);
}

#[tokio::test]
async fn test_first_idle_observation_resolves_last_build() {
    let failed_compile = build(
        354,
        &["failed", "compile"],
        vec![
            BuildStep::new("make_target_compile", &["compile", "warnings"]),
            BuildStep::new("make_package_compile", &["compile", "failed"]),
        ],
    );
    let provider = Arc::new(
        FakeProvider::states([BuilderState::Idle])
            .with_build(353, successful_build(353))
            .with_build(354, failed_compile),
    );
    let light = Arc::new(RecordingLight::default());
    let mut poller = poller(&provider, &light, CancellationToken::new());
    assert_eq!(poller.cached_state(), BuilderState::Unknown);

    let outcome = poller.poll_once().await;

    assert_eq!(
        outcome,
        PollOutcome::Transitioned {
            from: BuilderState::Unknown,
            to: BuilderState::Idle,
            color: Some(LightColor::Blue),
        }
    );
    assert_eq!(light.colors(), vec![LightColor::Blue]);
}

#[tokio::test]
async fn test_outcome_colors_follow_configured_table() {
    let table = ColorTable {
        test_failed: LightColor::Pink,
        ..ColorTable::default()
    };
    let provider = Arc::new(FakeProvider::states([BuilderState::Idle]).with_build(
        8,
        build(
            8,
            &["failed"],
            vec![BuildStep::new("unit_tests", &["python", "failed"])],
        ),
    ));
    let light = Arc::new(RecordingLight::default());
    let mut poller = StatusPoller::new(
        provider.clone(),
        light.clone(),
        OutcomeClassifier::default(),
        ColorMapper::new(table),
        PollerSettings::new("nightly", "desk"),
        CancellationToken::new(),
    );

    poller.poll_once().await;

    assert_eq!(light.colors(), vec![LightColor::Pink]);
}

#[tokio::test]
async fn test_fetch_failure_is_an_unknown_observation() {
    let provider = Arc::new(FakeProvider::new([
        Observation::Failure(502),
        Observation::Failure(502),
        Observation::State(BuilderState::Building),
    ]));
    let light = Arc::new(RecordingLight::default());
    let mut poller = poller(&provider, &light, CancellationToken::new())
        .with_initial_state(BuilderState::Building);

    let first = poller.poll_once().await;
    let second = poller.poll_once().await;
    let third = poller.poll_once().await;

    assert_eq!(
        first,
        PollOutcome::Transitioned {
            from: BuilderState::Building,
            to: BuilderState::Unknown,
            color: None,
        }
    );
    assert_eq!(second, PollOutcome::Unchanged(BuilderState::Unknown));
    assert_eq!(
        third,
        PollOutcome::Transitioned {
            from: BuilderState::Unknown,
            to: BuilderState::Building,
            color: Some(LightColor::Red),
        }
    );
    assert_eq!(light.colors(), vec![LightColor::Red]);
}

#[tokio::test]
async fn test_unrecognized_state_leaves_light_alone() {
    let provider = Arc::new(FakeProvider::states([BuilderState::Unknown]));
    let light = Arc::new(RecordingLight::default());
    let mut poller =
        poller(&provider, &light, CancellationToken::new()).with_initial_state(BuilderState::Idle);

    let outcome = poller.poll_once().await;

    assert!(matches!(
        outcome,
        PollOutcome::Transitioned {
            to: BuilderState::Unknown,
            color: None,
            ..
        }
    ));
    assert!(light.colors().is_empty());
}

#[tokio::test]
async fn test_failed_build_lookup_is_retried_next_cycle() {
    let provider = Arc::new(
        FakeProvider::states([BuilderState::Idle, BuilderState::Idle])
            .with_build(19, successful_build(19)),
    );
    provider.set_fail_build_lookup(true);
    let light = Arc::new(RecordingLight::default());
    let mut poller = poller(&provider, &light, CancellationToken::new())
        .with_initial_state(BuilderState::Building);

    let first = poller.poll_once().await;
    assert_eq!(
        first,
        PollOutcome::Transitioned {
            from: BuilderState::Building,
            to: BuilderState::Unknown,
            color: None,
        }
    );
    assert!(light.colors().is_empty());

    provider.set_fail_build_lookup(false);
    poller.poll_once().await;

    assert_eq!(light.colors(), vec![LightColor::Green]);
    assert_eq!(poller.cached_state(), BuilderState::Idle);
    assert_eq!(provider.count_calls("ids"), 2);
}

#[tokio::test]
async fn test_idle_without_builds_caches_idle_without_color() {
    let provider = Arc::new(FakeProvider::states([BuilderState::Idle, BuilderState::Idle]));
    let light = Arc::new(RecordingLight::default());
    let mut poller = poller(&provider, &light, CancellationToken::new())
        .with_initial_state(BuilderState::Building);

    let first = poller.poll_once().await;
    let second = poller.poll_once().await;

    assert_eq!(
        first,
        PollOutcome::Transitioned {
            from: BuilderState::Building,
            to: BuilderState::Idle,
            color: None,
        }
    );
    assert_eq!(second, PollOutcome::Unchanged(BuilderState::Idle));
    assert!(light.colors().is_empty());
    assert_eq!(provider.count_calls("detail:"), 0);
}

#[tokio::test]
async fn test_light_failure_still_updates_cache() {
    let provider = Arc::new(FakeProvider::states([
        BuilderState::Building,
        BuilderState::Building,
    ]));
    let light = Arc::new(RecordingLight::failing());
    let mut poller = poller(&provider, &light, CancellationToken::new());

    poller.poll_once().await;
    poller.poll_once().await;

    assert_eq!(light.colors().len(), 1, "no retry while the state is unchanged");
    assert_eq!(poller.cached_state(), BuilderState::Building);
}

#[tokio::test]
async fn test_run_until_cancelled() {
    let cancel = CancellationToken::new();
    let provider = Arc::new(
        FakeProvider::states([
            BuilderState::Idle,
            BuilderState::Building,
            BuilderState::Building,
            BuilderState::Idle,
        ])
        .with_build(19, successful_build(19))
        .cancel_when_exhausted(cancel.clone()),
    );
    let light = Arc::new(RecordingLight::default());
    let mut poller = poller(&provider, &light, cancel.clone());

    tokio::time::timeout(Duration::from_secs(5), poller.run())
        .await
        .expect("poller should stop once cancelled");

    assert_eq!(
        light.colors(),
        vec![LightColor::Green, LightColor::Red, LightColor::Green]
    );
    assert_eq!(provider.count_calls("state"), 4);
}

#[tokio::test]
async fn test_run_with_cancelled_token_does_not_poll() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let provider = Arc::new(FakeProvider::states([BuilderState::Building]));
    let light = Arc::new(RecordingLight::default());
    let mut poller = poller(&provider, &light, cancel);

    poller.run().await;

    assert!(provider.calls().is_empty());
    assert!(light.colors().is_empty());
}

#[tokio::test]
async fn test_cancel_interrupts_sleep() {
    let cancel = CancellationToken::new();
    let provider = Arc::new(FakeProvider::states([BuilderState::Building]));
    let light = Arc::new(RecordingLight::default());
    // Interval far longer than the test timeout
    let mut poller_slow = StatusPoller::new(
        provider.clone(),
        light.clone(),
        OutcomeClassifier::default(),
        ColorMapper::default(),
        PollerSettings::new("nightly", "desk").with_interval(Duration::from_secs(3600)),
        cancel.clone(),
    );

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    tokio::time::timeout(Duration::from_secs(5), poller_slow.run())
        .await
        .expect("cancellation should cut the sleep short");
    canceller.await.unwrap();

    assert_eq!(light.colors(), vec![LightColor::Red]);
}

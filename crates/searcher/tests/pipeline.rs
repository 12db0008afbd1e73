use alloy::primitives::{keccak256, B256};
use oval_searcher::{
    self_transfer, ChainSnapshot, LiquidationPlanner, PipelineError, PipelineOutcome,
    PipelineState, Submission, SubmissionPipeline, WatcherOptions, COLLATERAL_AMOUNT,
};
use oval_test_utils::{
    chain::MockChain,
    events::{bundle_event, transaction_event},
    init_tracing,
    relay::{sim_failed, AfterEvents, MockRelay},
    TEST_CHAIN_ID, TEST_CONTRACTS, TEST_SIGNERS, TEST_USERS,
};
use oval_types::{sim_rejection, EventKind, EventMatcher};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const BUNDLE_HASH: B256 = B256::repeat_byte(0xbb);

const SNAPSHOT: ChainSnapshot = ChainSnapshot { block: 50, base_fee: Some(10), nonce: 3 };

async fn transfer() -> Submission {
    let bundle = self_transfer(&TEST_SIGNERS[0], TEST_CHAIN_ID, &SNAPSHOT).await.unwrap();
    Submission::new(bundle)
}

fn confirming_relay() -> MockRelay {
    MockRelay::new()
        .with_bundle_hash(BUNDLE_HASH)
        .with_event(bundle_event(B256::repeat_byte(0x01), [B256::repeat_byte(0x02)]))
        .with_event(bundle_event(keccak256(BUNDLE_HASH), [B256::repeat_byte(0x03)]))
}

#[tokio::test]
async fn confirms_on_bundle_identity() {
    init_tracing();
    let relay = confirming_relay();
    let pipeline = SubmissionPipeline::new(relay.clone());
    let submission = transfer().await;

    let outcome = pipeline.run(&submission).await.unwrap();

    let PipelineOutcome::Confirmed { receipt, event } = outcome else {
        panic!("expected confirmation, got {outcome:?}");
    };
    assert_eq!(receipt.bundle_hash, BUNDLE_HASH);
    assert_eq!(event.hash(), keccak256(BUNDLE_HASH));
    assert_eq!(pipeline.state(), PipelineState::Confirmed);

    assert_eq!(relay.subscriptions(), vec![EventKind::Bundle]);
    assert_eq!(relay.simulated(), vec![submission.bundle().clone()]);
    assert_eq!(relay.submitted(), vec![submission.bundle().clone()]);
    assert_eq!(relay.unsubscribes(), 1);
}

#[tokio::test]
async fn failed_simulation_is_never_submitted() {
    let relay = confirming_relay().with_report(sim_failed("execution reverted"));
    let pipeline = SubmissionPipeline::new(relay.clone());

    let outcome = pipeline.run(&transfer().await).await.unwrap();

    let PipelineOutcome::Aborted { report } = &outcome else {
        panic!("expected abort, got {outcome:?}");
    };
    assert_eq!(sim_rejection(report), Some("execution reverted"));
    assert!(outcome.receipt().is_none());
    assert_eq!(pipeline.state(), PipelineState::Aborted);
    assert_eq!(relay.simulated().len(), 1);
    assert!(relay.submitted().is_empty());
    assert_eq!(relay.unsubscribes(), 1);
}

#[tokio::test]
async fn simulation_error_fails_without_submitting() {
    let relay = confirming_relay().failing_simulate("relay unreachable");
    let pipeline = SubmissionPipeline::new(relay.clone());

    let err = pipeline.run(&transfer().await).await.unwrap_err();

    assert!(matches!(err, PipelineError::Simulate(_)));
    assert_eq!(pipeline.state(), PipelineState::Failed);
    assert!(relay.submitted().is_empty());
    assert_eq!(relay.unsubscribes(), 1);
}

#[tokio::test]
async fn submission_error_releases_subscription() {
    let relay = confirming_relay().failing_submit("bundle rejected");
    let pipeline = SubmissionPipeline::new(relay.clone());

    let err = pipeline.run(&transfer().await).await.unwrap_err();

    assert!(matches!(err, PipelineError::Submission(_)));
    assert_eq!(relay.submitted().len(), 1);
    assert_eq!(relay.unsubscribes(), 1);
}

#[tokio::test]
async fn subscribe_error_sends_nothing() {
    let relay = confirming_relay().failing_subscribe("stream refused");
    let pipeline = SubmissionPipeline::new(relay.clone());

    let err = pipeline.run(&transfer().await).await.unwrap_err();

    assert!(matches!(err, PipelineError::Subscribe(_)));
    assert!(relay.simulated().is_empty());
    assert!(relay.submitted().is_empty());
    assert_eq!(relay.unsubscribes(), 0);
}

#[tokio::test]
async fn stream_closed_before_confirmation() {
    let relay = MockRelay::new()
        .with_bundle_hash(BUNDLE_HASH)
        .with_event(bundle_event(B256::repeat_byte(0x01), []));
    let pipeline = SubmissionPipeline::new(relay.clone());

    let err = pipeline.run(&transfer().await).await.unwrap_err();

    assert!(matches!(err, PipelineError::StreamClosed));
    assert_eq!(pipeline.state(), PipelineState::Failed);
    assert_eq!(relay.unsubscribes(), 1);
}

#[tokio::test]
async fn stream_error_before_confirmation() {
    let relay =
        MockRelay::new().with_bundle_hash(BUNDLE_HASH).with_stream_error("connection reset");
    let pipeline = SubmissionPipeline::new(relay.clone());

    let err = pipeline.run(&transfer().await).await.unwrap_err();

    assert!(matches!(err, PipelineError::Stream(_)));
    assert!(err.to_string().contains("connection reset"));
    assert_eq!(relay.unsubscribes(), 1);
}

#[tokio::test]
async fn cancelled_while_waiting() {
    let relay = MockRelay::new().with_after_events(AfterEvents::Hang);
    let cancel = CancellationToken::new();
    let pipeline = SubmissionPipeline::new(relay.clone()).with_cancel_token(cancel.clone());
    cancel.cancel();

    let outcome = pipeline.run(&transfer().await).await.unwrap();

    assert!(matches!(outcome, PipelineOutcome::Cancelled { .. }));
    assert_eq!(pipeline.state(), PipelineState::Cancelled);
    assert_eq!(relay.submitted().len(), 1);
    assert_eq!(relay.unsubscribes(), 1);
}

#[tokio::test(start_paused = true)]
async fn times_out_without_confirmation() {
    let relay = MockRelay::new().with_after_events(AfterEvents::Hang);
    let options = WatcherOptions::new()
        .with_poll_interval(Duration::from_millis(200))
        .with_deadline(Duration::from_secs(5));
    let pipeline = SubmissionPipeline::new(relay.clone()).with_options(options);

    let outcome = pipeline.run(&transfer().await).await.unwrap();

    let PipelineOutcome::TimedOut { receipt } = outcome else {
        panic!("expected timeout, got {outcome:?}");
    };
    assert_eq!(receipt, relay.receipt());
    assert_eq!(pipeline.state(), PipelineState::TimedOut);
    assert_eq!(relay.unsubscribes(), 1);
}

#[tokio::test]
async fn transaction_matcher_waits_for_recipient() {
    let target = TEST_USERS[2];
    let relay = MockRelay::new()
        .with_event(transaction_event(B256::repeat_byte(0x05), TEST_USERS[3]))
        .with_event(transaction_event(B256::repeat_byte(0x06), target));
    let pipeline = SubmissionPipeline::new(relay.clone());
    let submission = transfer().await.with_matcher(EventMatcher::transaction_to(target));

    let outcome = pipeline.run(&submission).await.unwrap();

    assert_eq!(outcome.event().map(|event| event.hash()), Some(B256::repeat_byte(0x06)));
    assert_eq!(relay.subscriptions(), vec![EventKind::Transaction]);
    assert_eq!(relay.unsubscribes(), 1);
}

#[tokio::test]
async fn state_is_observable() {
    let pipeline = SubmissionPipeline::new(confirming_relay());
    let states = pipeline.subscribe_state();
    assert_eq!(*states.borrow(), PipelineState::Built);

    pipeline.run(&transfer().await).await.unwrap();

    assert_eq!(*states.borrow(), PipelineState::Confirmed);
    assert!(states.borrow().is_terminal());
}

#[tokio::test]
async fn liquidation_end_to_end() {
    let signer = &TEST_SIGNERS[4];
    let chain = MockChain::new(200, Some(1_000)).with_nonce(signer.address(), 9);
    let snapshot = ChainSnapshot::take(&chain, signer.address()).await.unwrap();

    let plan = LiquidationPlanner::new(signer.clone(), TEST_CONTRACTS, TEST_CHAIN_ID, 90)
        .plan(&snapshot, COLLATERAL_AMOUNT, signer.address(), 1_700_000_000)
        .await
        .unwrap();
    let bundle = plan.bundle.clone();
    let relay = confirming_relay();

    let outcome =
        SubmissionPipeline::new(relay.clone()).run(&plan.into_submission()).await.unwrap();

    assert!(matches!(outcome, PipelineOutcome::Confirmed { .. }));
    assert_eq!(relay.submitted(), vec![bundle]);
}

use crate::{ConfirmationWatcher, Relay, SubscriptionGuard, WatchOutcome, WatcherOptions};
use alloy::rpc::types::mev::{SendBundleResponse, SimBundleResponse};
use oval_bundle::Bundle;
use oval_types::{
    bundle_event_hash, sim_rejection, EventKind, EventMatcher, PendingEvent, ValueSplit,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn, Span};

/// Errors returned by [`SubmissionPipeline`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// Subscribing to relay events failed.
    #[error("failed to subscribe to relay events: {0}")]
    Subscribe(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The simulation request failed.
    #[error("failed to simulate bundle: {0}")]
    Simulate(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// Bundle submission failed.
    #[error("failed to submit bundle: {0}")]
    Submission(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The event stream ended before the bundle was seen.
    #[error("relay event stream closed before confirmation")]
    StreamClosed,
    /// The event stream failed before the bundle was seen.
    #[error("relay event stream failed: {0}")]
    Stream(#[source] Box<dyn core::error::Error + Send + Sync>),
}

/// Stages of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    /// The bundle is built and nothing has been sent.
    Built,
    /// Waiting for the relay's simulation result.
    Simulating,
    /// Simulation succeeded.
    Simulated,
    /// Waiting for the relay to accept the bundle.
    Submitting,
    /// The relay accepted the bundle.
    Submitted,
    /// Waiting for the bundle to appear on the event stream.
    AwaitingConfirmation,
    /// The bundle appeared on the event stream.
    Confirmed,
    /// Simulation rejected the bundle. Nothing was submitted.
    Aborted,
    /// The caller cancelled the run.
    Cancelled,
    /// The confirmation deadline passed.
    TimedOut,
    /// The run failed with a [`PipelineError`].
    Failed,
}

impl PipelineState {
    /// True if no further transitions follow.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Confirmed | Self::Aborted | Self::Cancelled | Self::TimedOut | Self::Failed
        )
    }
}

/// How a pipeline run ended, short of an error.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The bundle was submitted and seen on the event stream.
    Confirmed {
        /// The relay's receipt.
        receipt: SendBundleResponse,
        /// The matching event.
        event: PendingEvent,
    },
    /// Simulation rejected the bundle, so it was never submitted.
    Aborted {
        /// The simulation result.
        report: SimBundleResponse,
    },
    /// The bundle was submitted, then the caller cancelled the wait.
    Cancelled {
        /// The relay's receipt.
        receipt: SendBundleResponse,
    },
    /// The bundle was submitted, but not seen before the deadline.
    TimedOut {
        /// The relay's receipt.
        receipt: SendBundleResponse,
    },
}

impl PipelineOutcome {
    /// The terminal state of the run.
    pub const fn state(&self) -> PipelineState {
        match self {
            Self::Confirmed { .. } => PipelineState::Confirmed,
            Self::Aborted { .. } => PipelineState::Aborted,
            Self::Cancelled { .. } => PipelineState::Cancelled,
            Self::TimedOut { .. } => PipelineState::TimedOut,
        }
    }

    /// The relay's receipt, if the bundle was submitted.
    pub const fn receipt(&self) -> Option<&SendBundleResponse> {
        match self {
            Self::Confirmed { receipt, .. }
            | Self::Cancelled { receipt }
            | Self::TimedOut { receipt } => Some(receipt),
            Self::Aborted { .. } => None,
        }
    }

    /// The matching event, if the bundle was confirmed.
    pub const fn event(&self) -> Option<&PendingEvent> {
        match self {
            Self::Confirmed { event, .. } => Some(event),
            _ => None,
        }
    }
}

/// A bundle ready for the pipeline, with what to wait for once it is
/// submitted.
#[derive(Debug, Clone)]
pub struct Submission {
    bundle: Bundle,
    matcher: EventMatcher,
    split: Option<ValueSplit>,
}

impl Submission {
    /// Submit `bundle` and wait for the bundle event carrying its identity.
    pub fn new(bundle: Bundle) -> Self {
        Self { bundle, matcher: EventMatcher::default(), split: None }
    }

    /// Wait for events satisfying `matcher` instead. For bundle matchers the
    /// identity returned by the relay is still required.
    pub fn with_matcher(mut self, matcher: EventMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Record the economic split of the bundle in logs.
    pub const fn with_split(mut self, split: ValueSplit) -> Self {
        self.split = Some(split);
        self
    }

    /// The bundle.
    pub const fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// The matcher applied to events.
    pub const fn matcher(&self) -> &EventMatcher {
        &self.matcher
    }

    /// The value split, if any.
    pub const fn split(&self) -> Option<&ValueSplit> {
        self.split.as_ref()
    }
}

/// Simulates, submits and confirms bundles.
///
/// The relay subscription is opened before anything is sent, so no event
/// can be missed, and released exactly once on every path out of
/// [`SubmissionPipeline::run`]. Failed simulations are never submitted and
/// never retried.
#[derive(Debug)]
pub struct SubmissionPipeline<R> {
    relay: R,
    options: WatcherOptions,
    cancel: CancellationToken,
    state: watch::Sender<PipelineState>,
}

impl<R> SubmissionPipeline<R> {
    /// Create a new pipeline with default watcher options.
    pub fn new(relay: R) -> Self {
        Self {
            relay,
            options: WatcherOptions::new(),
            cancel: CancellationToken::new(),
            state: watch::Sender::new(PipelineState::Built),
        }
    }

    /// Set the watcher options.
    pub const fn with_options(mut self, options: WatcherOptions) -> Self {
        self.options = options;
        self
    }

    /// Cancel confirmation waits when `cancel` fires.
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Get a reference to the relay.
    pub const fn relay(&self) -> &R {
        &self.relay
    }

    /// Get the watcher options.
    pub const fn options(&self) -> &WatcherOptions {
        &self.options
    }

    /// Get the cancellation token.
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// The current state.
    pub fn state(&self) -> PipelineState {
        *self.state.borrow()
    }

    /// Follow state transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    fn transition(&self, state: PipelineState) {
        let previous = self.state.send_replace(state);
        tracing::debug!(from = ?previous, to = ?state, "pipeline transition");
    }
}

impl<R> SubmissionPipeline<R>
where
    R: Relay + Send + Sync,
{
    /// Run a submission to a terminal state.
    #[instrument(skip_all, fields(
        block = submission.bundle.inclusion().block(),
        entries = submission.bundle.len(),
        captured = submission.split.map(|s| s.total().to_string()),
        builder_payment = submission.split.map(|s| s.builder_payment().to_string()),
        bundle_hash = tracing::field::Empty,
    ))]
    pub async fn run(&self, submission: &Submission) -> Result<PipelineOutcome, PipelineError> {
        let result = self.run_inner(submission).await;
        if result.is_err() {
            self.transition(PipelineState::Failed);
        }
        result
    }

    async fn run_inner(&self, submission: &Submission) -> Result<PipelineOutcome, PipelineError> {
        let Submission { bundle, matcher, .. } = submission;
        self.transition(PipelineState::Built);

        let subscription = self
            .relay
            .subscribe(matcher.kind())
            .await
            .map_err(|error| PipelineError::Subscribe(Box::new(error)))?;
        let mut subscription = SubscriptionGuard::new(subscription);

        self.transition(PipelineState::Simulating);
        let report = self
            .relay
            .simulate(bundle)
            .await
            .map_err(|error| PipelineError::Simulate(Box::new(error)))?;

        if let Some(reason) = sim_rejection(&report) {
            warn!(%reason, "bundle simulation failed, not submitting");
            subscription.release();
            self.transition(PipelineState::Aborted);
            return Ok(PipelineOutcome::Aborted { report });
        }
        self.transition(PipelineState::Simulated);

        self.transition(PipelineState::Submitting);
        let receipt = self
            .relay
            .submit(bundle)
            .await
            .map_err(|error| PipelineError::Submission(Box::new(error)))?;
        Span::current().record("bundle_hash", tracing::field::display(receipt.bundle_hash));
        self.transition(PipelineState::Submitted);
        info!("bundle submitted");

        let matcher = match matcher.kind() {
            EventKind::Bundle => matcher.clone().with_bundle_hash(bundle_event_hash(&receipt)),
            EventKind::Transaction => matcher.clone(),
        };

        self.transition(PipelineState::AwaitingConfirmation);
        let watcher = ConfirmationWatcher::new(self.options, self.cancel.clone());
        match watcher.watch(subscription, matcher).await {
            WatchOutcome::Matched(event) => {
                self.transition(PipelineState::Confirmed);
                info!(event_hash = %event.hash(), "bundle confirmed on event stream");
                Ok(PipelineOutcome::Confirmed { receipt, event })
            }
            WatchOutcome::Cancelled => {
                self.transition(PipelineState::Cancelled);
                warn!("confirmation wait cancelled");
                Ok(PipelineOutcome::Cancelled { receipt })
            }
            WatchOutcome::TimedOut => {
                self.transition(PipelineState::TimedOut);
                warn!("bundle not confirmed before deadline");
                Ok(PipelineOutcome::TimedOut { receipt })
            }
            WatchOutcome::StreamClosed => {
                warn!("event stream closed before confirmation");
                Err(PipelineError::StreamClosed)
            }
            WatchOutcome::StreamError(error) => {
                warn!(%error, "event stream failed before confirmation");
                Err(PipelineError::Stream(Box::new(error)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        use PipelineState::*;
        for state in [Confirmed, Aborted, Cancelled, TimedOut, Failed] {
            assert!(state.is_terminal());
        }
        for state in [Built, Simulating, Simulated, Submitting, Submitted, AwaitingConfirmation] {
            assert!(!state.is_terminal());
        }
    }

    #[test]
    fn pipeline_error_display() {
        assert_eq!(
            PipelineError::StreamClosed.to_string(),
            "relay event stream closed before confirmation"
        );
    }
}

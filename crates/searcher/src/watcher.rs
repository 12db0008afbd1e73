use crate::{EventSubscription, SubscriptionGuard};
use oval_types::{EventMatcher, PendingEvent};
use std::time::Duration;
use tokio::{
    sync::oneshot,
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace, warn};

/// Default interval between "still waiting" heartbeats.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Options for configuring the [`ConfirmationWatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherOptions {
    /// Interval between heartbeat log lines.
    pub poll_interval: Duration,
    /// Give up after this long. `None` waits until cancelled.
    pub deadline: Option<Duration>,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl WatcherOptions {
    /// Create a new [`WatcherOptions`] with default values.
    pub const fn new() -> Self {
        Self { poll_interval: DEFAULT_POLL_INTERVAL, deadline: None }
    }

    /// Set the heartbeat interval.
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the deadline.
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// How a watch ended.
#[derive(Debug)]
pub enum WatchOutcome<E> {
    /// The awaited event arrived.
    Matched(PendingEvent),
    /// The caller cancelled the watch.
    Cancelled,
    /// The deadline passed.
    TimedOut,
    /// The stream ended before a match.
    StreamClosed,
    /// The stream failed before a match. Undecodable events do not end a
    /// watch; only transport failures surface here.
    StreamError(E),
}

impl<E> WatchOutcome<E> {
    /// True if the awaited event arrived.
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Waits for the relay to report a submitted bundle.
///
/// The stream is consumed by a spawned task that reports the first matching
/// event over a oneshot channel. The subscription is released before
/// [`ConfirmationWatcher::watch`] returns, whatever the outcome.
#[derive(Debug, Clone)]
pub struct ConfirmationWatcher {
    options: WatcherOptions,
    cancel: CancellationToken,
}

impl ConfirmationWatcher {
    /// Create a new watcher.
    pub const fn new(options: WatcherOptions, cancel: CancellationToken) -> Self {
        Self { options, cancel }
    }

    /// Get the options.
    pub const fn options(&self) -> &WatcherOptions {
        &self.options
    }

    /// Get the cancellation token.
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Watch the subscription until an event satisfies `matcher`, the caller
    /// cancels, the deadline passes, or the stream ends.
    #[instrument(skip_all, fields(kind = %matcher.kind(), expected = ?matcher.bundle_hash()))]
    pub async fn watch<S>(
        &self,
        subscription: SubscriptionGuard<S>,
        matcher: EventMatcher,
    ) -> WatchOutcome<S::Error>
    where
        S: EventSubscription + 'static,
    {
        let (tx, mut rx) = oneshot::channel();
        let stop = CancellationToken::new();
        let consumer = tokio::spawn(consume(subscription, matcher, tx, stop.clone()));

        let started = Instant::now();
        let deadline = async {
            match self.options.deadline {
                Some(deadline) => tokio::time::sleep(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(deadline);

        let poll_interval = self.options.poll_interval.max(Duration::from_millis(1));
        let mut heartbeat = tokio::time::interval_at(started + poll_interval, poll_interval);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let outcome = loop {
            tokio::select! {
                biased;
                reported = &mut rx => {
                    // A dropped sender means the consumer died without reporting.
                    break reported.unwrap_or(WatchOutcome::StreamClosed);
                }
                _ = self.cancel.cancelled() => break WatchOutcome::Cancelled,
                _ = &mut deadline => break WatchOutcome::TimedOut,
                _ = heartbeat.tick() => {
                    let waited_ms = saturating_millis(started.elapsed());
                    debug!(waited_ms, "awaiting confirmation");
                }
            }
        };

        stop.cancel();
        if let Err(err) = consumer.await {
            warn!(%err, "event consumer task failed");
        }
        outcome
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
fn saturating_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Drain the subscription until a match, the end of the stream, or `stop`.
/// Reports at most once, after the subscription is released.
async fn consume<S: EventSubscription>(
    mut subscription: SubscriptionGuard<S>,
    matcher: EventMatcher,
    report: oneshot::Sender<WatchOutcome<S::Error>>,
    stop: CancellationToken,
) {
    let outcome = loop {
        let next = tokio::select! {
            biased;
            _ = stop.cancelled() => break None,
            next = subscription.next_event() => next,
        };

        match next {
            Some(Ok(event)) if matcher.matches(&event) => {
                debug!(hash = %event.hash(), "matched event");
                break Some(WatchOutcome::Matched(event));
            }
            Some(Ok(event)) => trace!(hash = %event.hash(), "ignoring event"),
            Some(Err(err)) => break Some(WatchOutcome::StreamError(err)),
            None => break Some(WatchOutcome::StreamClosed),
        }
    };

    subscription.release();
    if let Some(outcome) = outcome {
        // The receiver is gone if the watch already ended.
        let _ = report.send(outcome);
    }
}

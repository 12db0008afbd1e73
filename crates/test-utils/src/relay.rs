//! A mock [`Relay`] and its [`EventSubscription`].
use crate::MockError;
use alloy::{
    primitives::B256,
    rpc::types::mev::{SendBundleResponse, SimBundleResponse},
};
use oval_bundle::Bundle;
use oval_searcher::{EventSubscription, Relay};
use oval_types::{EventKind, PendingEvent};
use serde_json::json;
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

/// A simulation answer with zeroed figures.
pub fn sim_response(success: bool, error: Option<&str>) -> SimBundleResponse {
    serde_json::from_value(json!({
        "success": success,
        "error": error,
        "stateBlock": "0x0",
        "mevGasPrice": "0x0",
        "profit": "0x0",
        "refundableValue": "0x0",
        "gasUsed": "0x0",
    }))
    .expect("valid simulation response")
}

/// A successful simulation answer.
pub fn sim_ok() -> SimBundleResponse {
    sim_response(true, None)
}

/// A failed simulation answer carrying `error`.
pub fn sim_failed(error: &str) -> SimBundleResponse {
    sim_response(false, Some(error))
}

/// What a subscription does once its queued events run out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AfterEvents {
    /// Report the end of the stream.
    #[default]
    Close,
    /// Never yield again.
    Hang,
}

#[derive(Debug)]
struct RelayState {
    report: SimBundleResponse,
    receipt: SendBundleResponse,
    events: Vec<Result<PendingEvent, MockError>>,
    after_events: AfterEvents,
    event_delay: Duration,
    fail_subscribe: Option<MockError>,
    fail_simulate: Option<MockError>,
    fail_submit: Option<MockError>,
    simulated: Vec<Bundle>,
    submitted: Vec<Bundle>,
    subscriptions: Vec<EventKind>,
}

impl Default for RelayState {
    fn default() -> Self {
        Self {
            report: sim_ok(),
            receipt: SendBundleResponse { bundle_hash: B256::repeat_byte(0xbb) },
            events: Vec::new(),
            after_events: AfterEvents::default(),
            event_delay: Duration::ZERO,
            fail_subscribe: None,
            fail_simulate: None,
            fail_submit: None,
            simulated: Vec::new(),
            submitted: Vec::new(),
            subscriptions: Vec::new(),
        }
    }
}

/// A [`Relay`] that records calls and replays scripted events.
///
/// Every subscription receives a copy of the queued events. Releases are
/// counted across all subscriptions.
#[derive(Debug, Clone, Default)]
pub struct MockRelay {
    state: Arc<Mutex<RelayState>>,
    unsubscribes: Arc<AtomicUsize>,
}

impl MockRelay {
    /// Create a relay that accepts everything and streams nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer simulations with `report`.
    pub fn with_report(self, report: SimBundleResponse) -> Self {
        self.state.lock().unwrap().report = report;
        self
    }

    /// Answer submissions with `bundle_hash`.
    pub fn with_bundle_hash(self, bundle_hash: B256) -> Self {
        self.state.lock().unwrap().receipt = SendBundleResponse { bundle_hash };
        self
    }

    /// Queue an event.
    pub fn with_event(self, event: PendingEvent) -> Self {
        self.state.lock().unwrap().events.push(Ok(event));
        self
    }

    /// Queue a stream error.
    pub fn with_stream_error(self, message: &str) -> Self {
        self.state.lock().unwrap().events.push(Err(MockError::new(message)));
        self
    }

    /// Set what subscriptions do after the queued events.
    pub fn with_after_events(self, after_events: AfterEvents) -> Self {
        self.state.lock().unwrap().after_events = after_events;
        self
    }

    /// Delay every event.
    pub fn with_event_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().event_delay = delay;
        self
    }

    /// Fail subscription requests.
    pub fn failing_subscribe(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_subscribe = Some(MockError::new(message));
        self
    }

    /// Fail simulation requests.
    pub fn failing_simulate(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_simulate = Some(MockError::new(message));
        self
    }

    /// Fail submission requests.
    pub fn failing_submit(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_submit = Some(MockError::new(message));
        self
    }

    /// The receipt returned by submissions.
    pub fn receipt(&self) -> SendBundleResponse {
        self.state.lock().unwrap().receipt.clone()
    }

    /// Bundles passed to `simulate`.
    pub fn simulated(&self) -> Vec<Bundle> {
        self.state.lock().unwrap().simulated.clone()
    }

    /// Bundles passed to `submit`.
    pub fn submitted(&self) -> Vec<Bundle> {
        self.state.lock().unwrap().submitted.clone()
    }

    /// Kinds passed to `subscribe`.
    pub fn subscriptions(&self) -> Vec<EventKind> {
        self.state.lock().unwrap().subscriptions.clone()
    }

    /// Number of subscriptions released.
    pub fn unsubscribes(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }
}

impl Relay for MockRelay {
    type Error = MockError;
    type Subscription = MockSubscription;

    async fn simulate(&self, bundle: &Bundle) -> Result<SimBundleResponse, Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.simulated.push(bundle.clone());
        match &state.fail_simulate {
            Some(err) => Err(err.clone()),
            None => Ok(state.report.clone()),
        }
    }

    async fn submit(&self, bundle: &Bundle) -> Result<SendBundleResponse, Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.submitted.push(bundle.clone());
        match &state.fail_submit {
            Some(err) => Err(err.clone()),
            None => Ok(state.receipt.clone()),
        }
    }

    async fn subscribe(&self, kind: EventKind) -> Result<Self::Subscription, Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.subscriptions.push(kind);
        if let Some(err) = &state.fail_subscribe {
            return Err(err.clone());
        }
        Ok(MockSubscription {
            events: state.events.iter().cloned().collect(),
            after_events: state.after_events,
            delay: state.event_delay,
            unsubscribes: self.unsubscribes.clone(),
        })
    }
}

/// A scripted [`EventSubscription`].
#[derive(Debug)]
pub struct MockSubscription {
    events: VecDeque<Result<PendingEvent, MockError>>,
    after_events: AfterEvents,
    delay: Duration,
    unsubscribes: Arc<AtomicUsize>,
}

impl MockSubscription {
    /// A standalone subscription yielding `events`, counting releases in
    /// `unsubscribes`.
    pub fn new(
        events: impl IntoIterator<Item = Result<PendingEvent, MockError>>,
        after_events: AfterEvents,
        unsubscribes: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            events: events.into_iter().collect(),
            after_events,
            delay: Duration::ZERO,
            unsubscribes,
        }
    }

    /// Delay every event.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl EventSubscription for MockSubscription {
    type Error = MockError;

    async fn next_event(&mut self) -> Option<Result<PendingEvent, Self::Error>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.events.pop_front() {
            Some(event) => Some(event),
            None => match self.after_events {
                AfterEvents::Close => None,
                AfterEvents::Hang => std::future::pending().await,
            },
        }
    }

    fn unsubscribe(&mut self) {
        self.unsubscribes.fetch_add(1, Ordering::SeqCst);
    }
}

use crate::{EventSubscription, Relay};
use alloy::{
    rpc::types::mev::{SendBundleResponse, SimBundleResponse},
    signers::Signer,
};
use oval_bundle::Bundle;
use oval_relay::{EventStream, MevShareClient, RelayError};
use oval_types::{EventKind, PendingEvent};

impl<S> Relay for MevShareClient<S>
where
    S: Signer + Send + Sync,
{
    type Error = RelayError;
    type Subscription = EventStream;

    async fn simulate(&self, bundle: &Bundle) -> Result<SimBundleResponse, Self::Error> {
        self.simulate_bundle(bundle).await
    }

    async fn submit(&self, bundle: &Bundle) -> Result<SendBundleResponse, Self::Error> {
        self.send_bundle(bundle).await
    }

    async fn subscribe(&self, kind: EventKind) -> Result<Self::Subscription, Self::Error> {
        MevShareClient::subscribe(self, kind).await
    }
}

impl EventSubscription for EventStream {
    type Error = RelayError;

    async fn next_event(&mut self) -> Option<Result<PendingEvent, Self::Error>> {
        EventStream::next_event(self).await
    }

    fn unsubscribe(&mut self) {
        self.close();
    }
}

use crate::{
    rpc::{self, SEND_BUNDLE, SIM_BUNDLE},
    EventStream, Result,
};
use alloy::{
    hex,
    primitives::keccak256,
    rpc::{
        json_rpc::{Response, RpcRecv, RpcSend},
        types::mev::{SendBundleResponse, SimBundleOverrides, SimBundleResponse},
    },
    signers::{local::PrivateKeySigner, Signer},
};
use futures_util::{StreamExt, TryStreamExt};
use oval_bundle::Bundle;
use oval_constants::RelayEndpoints;
use oval_types::EventKind;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::{debug, instrument, warn};

/// Header carrying the request signature.
pub const FLASHBOTS_SIGNATURE_HEADER: &str = "X-Flashbots-Signature";

/// MEV-Share relay client.
///
/// Sends authenticated JSON-RPC requests to the relay and subscribes to its
/// event stream. Every request body is signed by the configured signer, whose
/// address is the searcher's reputation identity at the relay.
#[derive(Debug, Clone)]
pub struct MevShareClient<S = PrivateKeySigner> {
    /// The relay JSON-RPC URL.
    relay_url: reqwest::Url,
    /// The relay event stream URL.
    stream_url: reqwest::Url,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
    /// Signs request bodies.
    signer: S,
    next_id: Arc<AtomicU64>,
}

impl<S> MevShareClient<S>
where
    S: Signer + Send + Sync,
{
    /// Create a new client with the given URLs, signer and reqwest client.
    pub fn new_with_client(
        relay_url: reqwest::Url,
        stream_url: reqwest::Url,
        signer: S,
        client: reqwest::Client,
    ) -> Self {
        Self { relay_url, stream_url, client, signer, next_id: Arc::new(AtomicU64::new(1)) }
    }

    /// Create a new client with the given URLs, signer and a new reqwest
    /// client.
    pub fn new(relay_url: reqwest::Url, stream_url: reqwest::Url, signer: S) -> Self {
        Self::new_with_client(relay_url, stream_url, signer, reqwest::Client::new())
    }

    /// Create a new client given string URLs.
    pub fn new_from_strings(relay_url: &str, stream_url: &str, signer: S) -> Result<Self> {
        Ok(Self::new(relay_url.parse()?, stream_url.parse()?, signer))
    }

    /// Connect to a known relay.
    pub fn from_endpoints(endpoints: RelayEndpoints, signer: S) -> Result<Self> {
        Self::new_from_strings(endpoints.relay(), endpoints.stream(), signer)
    }

    /// Get the client used to send requests.
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Get the signer used to authenticate requests.
    pub const fn signer(&self) -> &S {
        &self.signer
    }

    /// Get the relay JSON-RPC URL.
    pub const fn relay_url(&self) -> &reqwest::Url {
        &self.relay_url
    }

    /// Get the relay event stream URL.
    pub const fn stream_url(&self) -> &reqwest::Url {
        &self.stream_url
    }

    /// Compute the `X-Flashbots-Signature` header value for a request body.
    ///
    /// The signer signs the 0x-prefixed hex of the body's keccak256 as an
    /// EIP-191 message.
    pub async fn auth_header(&self, body: &[u8]) -> Result<String> {
        let digest = hex::encode_prefixed(keccak256(body));
        let signature = self.signer.sign_message(digest.as_bytes()).await?;
        Ok(format!(
            "{}:{}",
            self.signer.address(),
            hex::encode_prefixed(signature.as_bytes())
        ))
    }

    async fn call<P, R>(&self, method: &'static str, params: P) -> Result<R>
    where
        P: RpcSend,
        R: RpcRecv,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::to_vec(&rpc::request(id, method, params))?;
        let auth = self.auth_header(&body).await?;

        let response = self
            .client
            .post(self.relay_url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(FLASHBOTS_SIGNATURE_HEADER, auth)
            .body(body)
            .send()
            .await
            .inspect_err(|e| warn!(%e, method, "Failed to contact relay"))?
            .error_for_status()?;

        let response = response
            .json::<Response<R>>()
            .await
            .inspect_err(|e| warn!(%e, method, "Failed to parse response from relay"))?;
        rpc::into_result(response)
    }

    /// Simulate a bundle at the relay with `mev_simBundle`.
    #[instrument(skip_all, fields(block = bundle.inclusion().block()))]
    pub async fn simulate_bundle(&self, bundle: &Bundle) -> Result<SimBundleResponse> {
        let params = (bundle.request().clone(), SimBundleOverrides::default());
        let report: SimBundleResponse = self.call(SIM_BUNDLE, params).await?;
        debug!(success = report.success, profit = ?report.profit, "simulated bundle");
        Ok(report)
    }

    /// Submit a bundle to the relay with `mev_sendBundle`.
    #[instrument(skip_all, fields(block = bundle.inclusion().block()))]
    pub async fn send_bundle(&self, bundle: &Bundle) -> Result<SendBundleResponse> {
        let receipt: SendBundleResponse =
            self.call(SEND_BUNDLE, [bundle.request().clone()]).await?;
        debug!(bundle_hash = %receipt.bundle_hash, "submitted bundle");
        Ok(receipt)
    }

    /// Open the relay event stream, yielding events of the given kind.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, kind: EventKind) -> Result<EventStream> {
        let response = self
            .client
            .get(self.stream_url.clone())
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to open relay event stream"))?
            .error_for_status()?;

        debug!(url = %self.stream_url, "opened relay event stream");
        Ok(EventStream::new(kind, response.bytes_stream().map_ok(Into::into).boxed()))
    }
}

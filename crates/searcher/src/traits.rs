use alloy::{
    primitives::{Address, TxHash},
    rpc::types::mev::{SendBundleResponse, SimBundleResponse},
};
use core::future::Future;
use oval_bundle::Bundle;
use oval_types::{EventKind, PendingEvent};

/// The parts of a block header the searcher reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Block number.
    pub number: u64,
    /// Base fee per gas. Absent on pre-London chains.
    pub base_fee: Option<u64>,
}

/// A mined transaction, as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    /// The transaction hash.
    pub hash: TxHash,
    /// The recipient. `None` for contract creation.
    pub to: Option<Address>,
    /// Whether execution succeeded.
    pub success: bool,
    /// The block the transaction was mined in.
    pub block_number: Option<u64>,
}

/// A trait for reading chain state.
///
/// Implementors of this trait answer the few queries the searcher makes of a
/// node: the latest block, account nonces and transaction receipts.
pub trait ChainReader {
    /// The error type returned by queries.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Fetch the latest block.
    fn latest_block(&self) -> impl Future<Output = Result<BlockInfo, Self::Error>> + Send;

    /// Fetch the latest block number.
    fn block_number(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Fetch the next nonce of an account.
    fn nonce_of(&self, address: Address) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Wait until the transaction is mined and return its receipt.
    fn wait_for_transaction(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = Result<TxReceipt, Self::Error>> + Send;
}

/// A live subscription to relay events.
pub trait EventSubscription: Send {
    /// The error type yielded by the stream.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Wait for the next event. `None` means the stream has ended.
    fn next_event(
        &mut self,
    ) -> impl Future<Output = Option<Result<PendingEvent, Self::Error>>> + Send;

    /// Stop receiving events.
    fn unsubscribe(&mut self);
}

/// A trait for simulating and submitting bundles to a relay.
///
/// Implementors of this trait are responsible for forwarding bundles to a
/// builder auction and exposing its event stream.
pub trait Relay {
    /// The error type returned by relay operations.
    type Error: core::error::Error + Send + Sync + 'static;
    /// The event subscription type.
    type Subscription: EventSubscription + 'static;

    /// Simulate a bundle.
    fn simulate(
        &self,
        bundle: &Bundle,
    ) -> impl Future<Output = Result<SimBundleResponse, Self::Error>> + Send;

    /// Submit a bundle.
    fn submit(
        &self,
        bundle: &Bundle,
    ) -> impl Future<Output = Result<SendBundleResponse, Self::Error>> + Send;

    /// Subscribe to events of the given kind.
    fn subscribe(
        &self,
        kind: EventKind,
    ) -> impl Future<Output = Result<Self::Subscription, Self::Error>> + Send;
}

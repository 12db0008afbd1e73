//! A mock [`ChainReader`].
use crate::MockError;
use alloy::primitives::{Address, TxHash};
use oval_searcher::{BlockInfo, ChainReader, TxReceipt};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Debug, Default)]
struct ChainState {
    block: Option<BlockInfo>,
    nonces: HashMap<Address, u64>,
    receipts: HashMap<TxHash, TxReceipt>,
    failing: HashSet<TxHash>,
    panicking: HashSet<TxHash>,
    receipt_delay: Duration,
    receipt_queries: Vec<TxHash>,
}

/// A [`ChainReader`] answering from in-memory state.
///
/// Receipts for unknown hashes are reported as errors rather than waited on.
#[derive(Debug, Clone, Default)]
pub struct MockChain {
    state: Arc<Mutex<ChainState>>,
}

impl MockChain {
    /// Create a chain at `number` with the given base fee.
    pub fn new(number: u64, base_fee: Option<u64>) -> Self {
        let chain = Self::default();
        chain.set_block(number, base_fee);
        chain
    }

    /// Replace the latest block.
    pub fn set_block(&self, number: u64, base_fee: Option<u64>) {
        self.state.lock().unwrap().block = Some(BlockInfo { number, base_fee });
    }

    /// Set an account's next nonce.
    pub fn with_nonce(self, address: Address, nonce: u64) -> Self {
        self.state.lock().unwrap().nonces.insert(address, nonce);
        self
    }

    /// Report `hash` as mined in `block` with recipient `to`.
    pub fn with_mined(self, hash: TxHash, to: Address, block: u64) -> Self {
        let receipt = TxReceipt { hash, to: Some(to), success: true, block_number: Some(block) };
        self.state.lock().unwrap().receipts.insert(hash, receipt);
        self
    }

    /// Fail receipt lookups for `hash`.
    pub fn with_failure(self, hash: TxHash) -> Self {
        self.state.lock().unwrap().failing.insert(hash);
        self
    }

    /// Panic inside receipt lookups for `hash`.
    pub fn with_panic(self, hash: TxHash) -> Self {
        self.state.lock().unwrap().panicking.insert(hash);
        self
    }

    /// Delay every receipt lookup.
    pub fn with_receipt_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().receipt_delay = delay;
        self
    }

    /// Hashes whose receipts were requested, in request order.
    pub fn receipt_queries(&self) -> Vec<TxHash> {
        self.state.lock().unwrap().receipt_queries.clone()
    }
}

impl ChainReader for MockChain {
    type Error = MockError;

    async fn latest_block(&self) -> Result<BlockInfo, Self::Error> {
        self.state.lock().unwrap().block.ok_or_else(|| MockError::new("no block"))
    }

    async fn block_number(&self) -> Result<u64, Self::Error> {
        self.latest_block().await.map(|block| block.number)
    }

    async fn nonce_of(&self, address: Address) -> Result<u64, Self::Error> {
        Ok(self.state.lock().unwrap().nonces.get(&address).copied().unwrap_or_default())
    }

    async fn wait_for_transaction(&self, hash: TxHash) -> Result<TxReceipt, Self::Error> {
        let (delay, panics) = {
            let mut state = self.state.lock().unwrap();
            state.receipt_queries.push(hash);
            (state.receipt_delay, state.panicking.contains(&hash))
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        // The lock is released here so the panic does not poison it.
        assert!(!panics, "receipt lookup panicked for {hash}");

        let state = self.state.lock().unwrap();
        if state.failing.contains(&hash) {
            return Err(MockError::new(format!("receipt lookup failed for {hash}")));
        }
        state
            .receipts
            .get(&hash)
            .copied()
            .ok_or_else(|| MockError::new(format!("unknown transaction {hash}")))
    }
}

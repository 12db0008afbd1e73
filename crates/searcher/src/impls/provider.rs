use crate::{BlockInfo, ChainReader, TxReceipt};
use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Address, TxHash},
    providers::Provider,
    transports::TransportError,
};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Default interval between receipt polls.
pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Errors returned by [`RpcChain`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RpcChainError {
    /// The node request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The node returned no latest block.
    #[error("node returned no latest block")]
    MissingBlock,
    /// The transaction was not mined before the receipt timeout.
    #[error("transaction {0} not mined before timeout")]
    ReceiptTimeout(TxHash),
}

/// A [`ChainReader`] backed by an alloy [`Provider`].
#[derive(Debug, Clone)]
pub struct RpcChain<P> {
    provider: P,
    poll_interval: Duration,
    receipt_timeout: Option<Duration>,
}

impl<P> RpcChain<P> {
    /// Wrap a provider, polling receipts every
    /// [`DEFAULT_RECEIPT_POLL_INTERVAL`] with no timeout.
    pub const fn new(provider: P) -> Self {
        Self { provider, poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL, receipt_timeout: None }
    }

    /// Set the receipt poll interval.
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Give up waiting for a receipt after `timeout`.
    pub const fn with_receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = Some(timeout);
        self
    }

    /// Get a reference to the provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> ChainReader for RpcChain<P>
where
    P: Provider,
{
    type Error = RpcChainError;

    async fn latest_block(&self) -> Result<BlockInfo, Self::Error> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await?
            .ok_or(RpcChainError::MissingBlock)?;
        Ok(BlockInfo { number: block.header.number, base_fee: block.header.base_fee_per_gas })
    }

    async fn block_number(&self) -> Result<u64, Self::Error> {
        self.provider.get_block_number().await.map_err(Into::into)
    }

    async fn nonce_of(&self, address: Address) -> Result<u64, Self::Error> {
        self.provider.get_transaction_count(address).await.map_err(Into::into)
    }

    async fn wait_for_transaction(&self, hash: TxHash) -> Result<TxReceipt, Self::Error> {
        let started = Instant::now();
        loop {
            if let Some(receipt) = self.provider.get_transaction_receipt(hash).await? {
                return Ok(TxReceipt {
                    hash,
                    to: receipt.to,
                    success: receipt.status(),
                    block_number: receipt.block_number,
                });
            }

            if self.receipt_timeout.is_some_and(|timeout| started.elapsed() >= timeout) {
                return Err(RpcChainError::ReceiptTimeout(hash));
            }
            trace!(%hash, "receipt not yet available");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

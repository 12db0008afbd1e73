use alloy::primitives::Address;
use oval_types::RecoverError;

/// Errors that can occur while assembling or validating a [`Bundle`].
///
/// [`Bundle`]: crate::Bundle
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BundleError {
    /// Bundles must contain at least one entry.
    #[error("bundle must contain at least one entry")]
    EmptyBundle,

    /// The inclusion window ends before it starts.
    #[error("invalid inclusion window: block {block} is after max block {max_block}")]
    InvalidInclusionWindow {
        /// First eligible block.
        block: u64,
        /// Last eligible block.
        max_block: u64,
    },

    /// A refund percentage above 100.
    #[error("refund percent must be between 0 and 100, got {0}")]
    InvalidRefundPercent(u64),

    /// A refund names a body index with no entry.
    #[error("refund body index {index} out of range for bundle with {len} entries")]
    RefundIndexOutOfRange {
        /// The index named by the refund.
        index: u64,
        /// Number of entries in the bundle.
        len: usize,
    },

    /// A sender's nonces are not strictly increasing in execution order.
    #[error("nonce {found} from {sender} executes after nonce {previous}")]
    NonceOrder {
        /// The sender.
        sender: Address,
        /// The nonce of the sender's previous transaction.
        previous: u64,
        /// The offending nonce.
        found: u64,
    },

    /// A transaction could not be decoded or its sender recovered.
    #[error("failed to recover transaction at flattened index {index}: {source}")]
    Recover {
        /// Index of the transaction in execution order.
        index: usize,
        /// The underlying error.
        #[source]
        source: RecoverError,
    },
}

mod mev_share;

mod provider;
pub use provider::{RpcChain, RpcChainError, DEFAULT_RECEIPT_POLL_INTERVAL};

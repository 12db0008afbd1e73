//! Oval Searcher Library
//!
//! Plans the Oval liquidation scenario and drives bundles through a
//! MEV-Share relay: simulate, submit, wait for the relay to report the
//! bundle, then observe inclusion on chain.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod guard;
pub use guard::SubscriptionGuard;

mod impls;
pub use impls::{RpcChain, RpcChainError, DEFAULT_RECEIPT_POLL_INTERVAL};

mod observer;
pub use observer::{InclusionObserver, Observation};

mod pipeline;
pub use pipeline::{
    PipelineError, PipelineOutcome, PipelineState, Submission, SubmissionPipeline,
};

mod scenario;
pub use scenario::{
    self_transfer, ChainSnapshot, LiquidationPlan, LiquidationPlanner, ScenarioError,
    BUILDER_BID_PERCENT, COLLATERAL_AMOUNT, SELF_TRANSFER_RANGE, TRANSFER_GAS_LIMIT,
};

mod traits;
pub use traits::{BlockInfo, ChainReader, EventSubscription, Relay, TxReceipt};

mod watcher;
pub use watcher::{ConfirmationWatcher, WatchOutcome, WatcherOptions, DEFAULT_POLL_INTERVAL};

//! Types shared across the Oval searcher: fee and value-split arithmetic,
//! transaction intents, relay events and configuration.

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod config;
pub use config::{env_utils, ConfigError, OvalConfig, ScenarioContracts};

/// Environment variable names read by [`OvalConfig::from_env`].
pub mod vars {
    pub use crate::config::{
        CHAINLINK_OVAL_IMMUTABLE_ADDRESS, CHAIN_ID, MEV_SHARE_RELAY_URL, MEV_SHARE_STREAM_URL,
        NODE_URL_PREFIX, OVAL_LIQUIDATION_DEMO_ADDRESS, OVAL_LIQUIDATION_DEMO_PRICE_FEED_ADDRESS,
        PAY_BUILDER_ADDRESS, PRIVATE_KEY, PROTOCOL_REFUND_PERCENT,
    };
}

mod events;
pub use events::{
    addresses_eq, EventKind, EventMatcher, EventTransaction, PendingBundle, PendingEvent,
    PendingTransaction, StreamEvent,
};

mod fees;
pub use fees::{FeeError, FeeParams, BASE_FEE_MULTIPLIER, DEFAULT_PRIORITY_FEE};

mod relay;
pub use relay::{bundle_event_hash, sim_rejection, UNSPECIFIED_SIM_FAILURE};

mod signing;
pub use signing::{
    RecoverError, SignedTransaction, SigningError, TransactionIntent, DEFAULT_GAS_LIMIT,
};

mod split;
pub use split::{builder_bid, SplitError, ValueSplit};

#[cfg(any(test, feature = "test-utils"))]
/// Utils for unit and integration tests.
pub mod test_utils;

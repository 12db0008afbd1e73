//! Bindings for the Oval oracle and the demo contracts used by the
//! liquidation scenario.
//!
//! The bindings are declared inline with [`alloy::sol!`], and are used both
//! for calldata encoding (via [`SolCall`]) and, with the `rpc` attribute, as
//! contract instances for the scenario setup calls.
//!
//! [`SolCall`]: alloy::sol_types::SolCall
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

mod bindings;
pub use bindings::{
    ChainlinkOvalImmutable, OvalLiquidationDemo, OvalLiquidationDemoPriceFeed, PayBuilder,
};

mod feed;
pub use feed::{PriceRound, INITIAL_PRICE, LIQUIDATION_PRICE, PRICE_DECIMALS};

//! Oval searcher constants.
//!
//! This crate contains the networks the searcher knows how to reach, and the
//! MEV-Share relay and event stream endpoints for each of them.

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

mod chains;
#[allow(deprecated)]
pub use chains::goerli;
pub use chains::{holesky, mainnet, sepolia};

#[cfg(any(test, feature = "test-utils"))]
pub use chains::test_utils;

mod types;
pub use types::{KnownChains, ParseChainError, RelayEndpoints};

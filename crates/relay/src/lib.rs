//! MEV-Share relay client.
//!
//! [`MevShareClient`] simulates and submits bundles over authenticated
//! JSON-RPC, and opens [`EventStream`] subscriptions to the relay's
//! server-sent event feed.

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

mod client;
pub use client::{MevShareClient, FLASHBOTS_SIGNATURE_HEADER};

mod error;
pub use error::{RelayError, Result};

/// JSON-RPC envelopes for relay requests.
pub mod rpc;

mod stream;
pub use stream::{EventStream, SseDecoder};

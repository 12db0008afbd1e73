//! Oval Bundle Library
//!
//! Contains the [`Bundle`] type sent to MEV-Share relays and the
//! [`BundleBuilder`] that validates it. A bundle wraps alloy's
//! [`SendBundleRequest`], so the wire format is alloy's. Bundles nest: a
//! complete bundle can be an entry of an outer bundle, and
//! [`Bundle::flatten`] recovers the execution order.

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

mod builder;
pub use builder::BundleBuilder;

mod bundle;
pub use bundle::Bundle;

mod error;
pub use error::BundleError;

mod inclusion;
pub use inclusion::{InclusionWindow, DEFAULT_HORIZON};

mod refund;
pub use refund::RefundDirective;

pub use alloy::rpc::types::mev::{
    BundleItem, Privacy, PrivacyHint, ProtocolVersion, Refund, RefundConfig, SendBundleRequest,
    Validity,
};

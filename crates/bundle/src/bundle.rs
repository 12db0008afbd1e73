//! The MEV-Share bundle type.
use crate::{BundleError, InclusionWindow};
use alloy::{
    primitives::{Address, TxHash},
    rpc::types::mev::{BundleItem, Privacy, ProtocolVersion, SendBundleRequest, Validity},
};
use oval_types::SignedTransaction;
use serde::Serialize;
use std::collections::HashMap;

/// An ordered set of transactions and nested bundles, submitted to the relay
/// as a unit via `mev_sendBundle`.
///
/// This wraps the relay's [`SendBundleRequest`]. Bundles are built with
/// [`BundleBuilder`], which validates the request, and are never mutated
/// afterwards.
///
/// [`BundleBuilder`]: crate::BundleBuilder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bundle {
    pub(crate) request: SendBundleRequest,
}

impl Bundle {
    /// The wire request.
    pub const fn request(&self) -> &SendBundleRequest {
        &self.request
    }

    /// Take the wire request.
    pub fn into_request(self) -> SendBundleRequest {
        self.request
    }

    /// The protocol version.
    pub const fn version(&self) -> &ProtocolVersion {
        &self.request.protocol_version
    }

    /// The inclusion window.
    pub fn inclusion(&self) -> InclusionWindow {
        InclusionWindow::from(&self.request.inclusion)
    }

    /// The body entries, in execution order.
    pub const fn entries(&self) -> &[BundleItem] {
        self.request.bundle_body.as_slice()
    }

    /// Number of body entries. Nested bundles count as one.
    pub fn len(&self) -> usize {
        self.request.bundle_body.len()
    }

    /// Always false for a built bundle.
    pub fn is_empty(&self) -> bool {
        self.request.bundle_body.is_empty()
    }

    /// The refund settings, if any.
    pub const fn refund(&self) -> Option<&Validity> {
        self.request.validity.as_ref()
    }

    /// The privacy settings. `None` means the relay defaults.
    pub const fn privacy(&self) -> Option<&Privacy> {
        self.request.privacy.as_ref()
    }

    /// Wrap this bundle as an entry of an outer bundle.
    pub fn into_item(self) -> BundleItem {
        BundleItem::Bundle { bundle: self.request }
    }

    /// All transactions in execution order with their revert flag, nested
    /// bundles expanded depth first.
    pub fn flatten(&self) -> Vec<(SignedTransaction, bool)> {
        let mut out = Vec::new();
        flatten_into(&self.request, &mut out);
        out
    }

    /// Hashes of all transactions in execution order.
    pub fn tx_hashes(&self) -> Vec<TxHash> {
        self.flatten().into_iter().map(|(tx, _)| tx.hash()).collect()
    }

    /// Check that every sender's nonces strictly increase in execution
    /// order.
    ///
    /// This decodes and recovers every transaction, which is expensive.
    pub fn check_nonce_order(&self) -> Result<(), BundleError> {
        let mut last: HashMap<Address, u64> = HashMap::new();

        for (index, (tx, _)) in self.flatten().into_iter().enumerate() {
            let (sender, envelope) =
                tx.recover().map_err(|source| BundleError::Recover { index, source })?;
            let found = alloy::consensus::Transaction::nonce(&envelope);

            if let Some(previous) = last.insert(sender, found) {
                if found <= previous {
                    return Err(BundleError::NonceOrder { sender, previous, found });
                }
            }
        }
        Ok(())
    }
}

impl From<Bundle> for SendBundleRequest {
    fn from(bundle: Bundle) -> Self {
        bundle.request
    }
}

impl From<Bundle> for BundleItem {
    fn from(bundle: Bundle) -> Self {
        bundle.into_item()
    }
}

fn flatten_into(request: &SendBundleRequest, out: &mut Vec<(SignedTransaction, bool)>) {
    for item in &request.bundle_body {
        match item {
            BundleItem::Tx { tx, can_revert } => {
                out.push((SignedTransaction::new(tx.clone()), *can_revert))
            }
            BundleItem::Bundle { bundle } => flatten_into(bundle, out),
            // Backrun targets are not ours to execute.
            BundleItem::Hash { hash } => tracing::trace!(%hash, "skipping hash entry"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{BundleBuilder, RefundDirective};
    use alloy::{
        primitives::{Bytes, B256, U256},
        rpc::types::mev::PrivacyHint,
    };
    use oval_types::{
        test_utils::{TEST_CHAIN_ID, TEST_SIGNERS, TEST_USERS},
        FeeParams, TransactionIntent,
    };

    fn raw(byte: u8) -> SignedTransaction {
        SignedTransaction::new(Bytes::from(vec![0x02, byte]))
    }

    async fn signed(signer: usize, nonce: u64) -> SignedTransaction {
        TransactionIntent::new(TEST_USERS[signer], TEST_USERS[signer], TEST_CHAIN_ID)
            .with_nonce(nonce)
            .with_value(U256::from(1))
            .with_fees(FeeParams::new(1, 0))
            .sign(&TEST_SIGNERS[signer])
            .await
            .unwrap()
    }

    #[test]
    fn flatten_nested_first() {
        let inner = BundleBuilder::new(10).with_tx(raw(1)).build().unwrap();
        let outer = BundleBuilder::new(10)
            .with_bundle(inner)
            .with_tx(raw(2))
            .with_reverting_tx(raw(3))
            .build()
            .unwrap();

        let flat = outer.flatten();
        assert_eq!(flat, vec![(raw(1), false), (raw(2), false), (raw(3), true)]);
        assert_eq!(outer.len(), 3);
        assert_eq!(outer.tx_hashes()[0], raw(1).hash());
    }

    #[test]
    fn flatten_single_nested_is_transparent() {
        let inner =
            BundleBuilder::new(5).with_tx(raw(1)).with_tx(raw(2)).build().unwrap();
        let outer = BundleBuilder::new(5).with_bundle(inner.clone()).build().unwrap();
        assert_eq!(outer.flatten(), inner.flatten());
    }

    #[test]
    fn flatten_skips_backrun_targets() {
        let mut request = BundleBuilder::new(5).with_tx(raw(1)).build().unwrap().into_request();
        request.bundle_body.insert(0, BundleItem::Hash { hash: B256::repeat_byte(0xee) });
        let bundle = Bundle { request };
        assert_eq!(bundle.flatten(), vec![(raw(1), false)]);
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn wire_format() {
        let refund_to = Address::repeat_byte(0x11);
        let inner = BundleBuilder::new(16)
            .with_tx(raw(1))
            .with_full_privacy()
            .with_refund(RefundDirective::to_recipient(refund_to, 100))
            .build()
            .unwrap();
        let outer = BundleBuilder::new(16)
            .with_bundle(inner.clone())
            .with_reverting_tx(raw(2))
            .with_privacy(Privacy {
                hints: Some(PrivacyHint::default().with_tx_hash()),
                builders: None,
            })
            .with_refund(RefundDirective::for_entry(0, 90))
            .build()
            .unwrap();

        // The bundle is exactly the relay request it wraps.
        let json = serde_json::to_value(&outer).unwrap();
        assert_eq!(json, serde_json::to_value(outer.request()).unwrap());

        assert!(json["inclusion"]["block"].is_string());
        assert!(json["inclusion"]["maxBlock"].is_string());
        assert_eq!(json["body"][0]["bundle"], serde_json::to_value(inner.request()).unwrap());
        assert_eq!(json["body"][1]["tx"], "0x0202");
        assert_eq!(json["body"][1]["canRevert"], true);
        assert!(json["validity"]["refund"][0].get("bodyIdx").is_some());
        assert!(json["validity"].get("refundConfig").is_none());
        assert_eq!(json["privacy"]["hints"], serde_json::json!(["tx_hash"]));

        let inner_json = &json["body"][0]["bundle"];
        assert_eq!(inner_json["body"][0]["canRevert"], false);
        assert!(inner_json["validity"]["refundConfig"][0].get("address").is_some());
        let hints = inner_json["privacy"]["hints"].as_array().unwrap();
        for hint in ["calldata", "logs", "function_selector", "contract_address", "tx_hash"] {
            assert!(hints.iter().any(|h| h == hint), "missing hint {hint}");
        }
    }

    #[tokio::test]
    async fn nonce_order_ok_across_nesting() {
        let inner = BundleBuilder::new(1).with_tx(signed(0, 4).await).build().unwrap();
        let outer = BundleBuilder::new(1)
            .with_bundle(inner)
            .with_tx(signed(1, 0).await)
            .with_tx(signed(0, 5).await)
            .with_tx(signed(0, 7).await)
            .build()
            .unwrap();
        outer.check_nonce_order().unwrap();
    }

    #[tokio::test]
    async fn nonce_order_violation() {
        let inner = BundleBuilder::new(1).with_tx(signed(0, 5).await).build().unwrap();
        let outer = BundleBuilder::new(1)
            .with_bundle(inner)
            .with_tx(signed(0, 5).await)
            .build()
            .unwrap();
        let err = outer.check_nonce_order().unwrap_err();
        assert!(matches!(
            err,
            BundleError::NonceOrder { sender, previous: 5, found: 5 } if sender == TEST_USERS[0]
        ));
    }

    #[test]
    fn nonce_order_undecodable() {
        let bundle = BundleBuilder::new(1).with_tx(raw(1)).build().unwrap();
        assert!(matches!(bundle.check_nonce_order(), Err(BundleError::Recover { index: 0, .. })));
    }
}

use crate::{Bundle, BundleError, InclusionWindow, RefundDirective, DEFAULT_HORIZON};
use alloy::rpc::types::mev::{
    BundleItem, Inclusion, Privacy, PrivacyHint, ProtocolVersion, SendBundleRequest,
};
use oval_types::SignedTransaction;

/// Hints sharing everything the relay can share about a transaction.
fn full_hints() -> PrivacyHint {
    PrivacyHint::default()
        .with_calldata()
        .with_logs()
        .with_function_selector()
        .with_contract_address()
        .with_tx_hash()
}

/// Assembles a [`Bundle`].
///
/// The builder never renumbers nonces. Callers add transactions in the order
/// they must execute; [`Bundle::check_nonce_order`] can verify the result.
#[derive(Debug, Clone)]
pub struct BundleBuilder {
    block: u64,
    max_block: Option<u64>,
    horizon: u64,
    body: Vec<BundleItem>,
    privacy: Option<Privacy>,
    refund: Option<RefundDirective>,
}

impl BundleBuilder {
    /// Start a bundle targeting `block`, eligible for [`DEFAULT_HORIZON`]
    /// more blocks.
    pub fn new(block: u64) -> Self {
        Self {
            block,
            max_block: None,
            horizon: DEFAULT_HORIZON,
            body: Vec::new(),
            privacy: None,
            refund: None,
        }
    }

    /// Set the last eligible block explicitly. Overrides the horizon.
    pub const fn with_max_block(mut self, max_block: u64) -> Self {
        self.max_block = Some(max_block);
        self
    }

    /// Set the number of blocks after the target for which the bundle stays
    /// eligible.
    pub const fn with_horizon(mut self, horizon: u64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Append an entry.
    pub fn with_entry(mut self, entry: impl Into<BundleItem>) -> Self {
        self.body.push(entry.into());
        self
    }

    /// Append a transaction that must not revert.
    pub fn with_tx(self, tx: SignedTransaction) -> Self {
        self.with_entry(BundleItem::Tx { tx: tx.into_bytes(), can_revert: false })
    }

    /// Append a transaction that may revert.
    pub fn with_reverting_tx(self, tx: SignedTransaction) -> Self {
        self.with_entry(BundleItem::Tx { tx: tx.into_bytes(), can_revert: true })
    }

    /// Append a nested bundle.
    pub fn with_bundle(self, bundle: Bundle) -> Self {
        self.with_entry(bundle)
    }

    /// Set the privacy settings.
    pub fn with_privacy(mut self, privacy: Privacy) -> Self {
        self.privacy = Some(privacy);
        self
    }

    /// Share calldata, logs, function selector, contract address and hash
    /// with every builder.
    pub fn with_full_privacy(self) -> Self {
        self.with_privacy(Privacy { hints: Some(full_hints()), builders: None })
    }

    /// Set the refund directive.
    pub fn with_refund(mut self, refund: RefundDirective) -> Self {
        self.refund = Some(refund);
        self
    }

    /// Validate and build the bundle.
    pub fn build(self) -> Result<Bundle, BundleError> {
        if self.body.is_empty() {
            return Err(BundleError::EmptyBundle);
        }

        let inclusion = match self.max_block {
            Some(max_block) => InclusionWindow::new(self.block, max_block)?,
            None => InclusionWindow::with_horizon(self.block, self.horizon),
        };

        if let Some(refund) = &self.refund {
            refund.validate(self.body.len())?;
        }

        tracing::trace!(
            block = inclusion.block(),
            max_block = inclusion.max_block(),
            entries = self.body.len(),
            "assembled bundle"
        );

        Ok(Bundle {
            request: SendBundleRequest {
                protocol_version: ProtocolVersion::V0_1,
                inclusion: Inclusion::from(inclusion),
                bundle_body: self.body,
                validity: self.refund.map(RefundDirective::into_validity),
                privacy: self.privacy,
            },
        })
    }
}

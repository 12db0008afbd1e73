use crate::BundleError;
use alloy::{
    primitives::Address,
    rpc::types::mev::{Refund, RefundConfig, Validity},
};

/// How a bundle's payment is refunded.
///
/// Lowered to the relay's [`Validity`] object when the bundle is built.
/// [`RefundDirective::Percent`] is shorthand for refunding the sender of the
/// first body entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundDirective {
    /// Refund the senders of the given body entries.
    ByEntry(Vec<Refund>),
    /// Refund a fixed address.
    ToRecipient(RefundConfig),
    /// Refund the sender of the first body entry.
    Percent(u64),
}

impl RefundDirective {
    /// Refund `percent` to the sender of body entry `body_idx`.
    pub fn for_entry(body_idx: u64, percent: u8) -> Self {
        Self::ByEntry(vec![Refund { body_idx, percent: u64::from(percent) }])
    }

    /// Refund `percent` to `address`.
    pub fn to_recipient(address: Address, percent: u8) -> Self {
        Self::ToRecipient(RefundConfig { address, percent: u64::from(percent) })
    }

    /// Check percentages and, given the number of body entries, indices.
    pub fn validate(&self, entries: usize) -> Result<(), BundleError> {
        fn check_pct(pct: u64) -> Result<(), BundleError> {
            if pct > 100 {
                return Err(BundleError::InvalidRefundPercent(pct));
            }
            Ok(())
        }

        match self {
            Self::ByEntry(refunds) => refunds.iter().try_for_each(|refund| {
                check_pct(refund.percent)?;
                if refund.body_idx >= entries as u64 {
                    return Err(BundleError::RefundIndexOutOfRange {
                        index: refund.body_idx,
                        len: entries,
                    });
                }
                Ok(())
            }),
            Self::ToRecipient(config) => check_pct(config.percent),
            Self::Percent(pct) => check_pct(*pct),
        }
    }

    /// Lower the directive to the relay's validity object.
    pub fn into_validity(self) -> Validity {
        match self {
            Self::ByEntry(refund) => Validity { refund: Some(refund), refund_config: None },
            Self::ToRecipient(config) => {
                Validity { refund: None, refund_config: Some(vec![config]) }
            }
            Self::Percent(percent) => Validity {
                refund: Some(vec![Refund { body_idx: 0, percent }]),
                refund_config: None,
            },
        }
    }
}

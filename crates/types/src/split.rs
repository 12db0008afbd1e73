//! Settlement accounting for captured value.
//!
//! The searcher keeps whatever it does not bid. The bid goes to the builder,
//! and the relay refunds part of the bid to the protocol that unlocked the
//! opportunity. Integer division truncates, so the protocol share is computed
//! by subtraction to keep the three amounts summing exactly to the captured
//! value.

use alloy::primitives::U256;

/// Errors computing a [`ValueSplit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    /// The builder payment is larger than the captured value.
    #[error("builder payment {payment} exceeds captured value {captured}")]
    PaymentExceedsCapture {
        /// The captured value.
        captured: U256,
        /// The builder payment.
        payment: U256,
    },
    /// A percentage outside `0..=100`.
    #[error("percentage must be between 0 and 100, got {0}")]
    PercentOutOfRange(u8),
}

/// Compute the builder payment bidding `bid_percent` of the captured value,
/// rounded down.
pub fn builder_bid(captured: U256, bid_percent: u8) -> Result<U256, SplitError> {
    if bid_percent > 100 {
        return Err(SplitError::PercentOutOfRange(bid_percent));
    }
    Ok(captured * U256::from(bid_percent) / U256::from(100))
}

/// The three-way split of a captured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueSplit {
    /// Kept by the searcher.
    pub searcher: U256,
    /// Kept by the block builder.
    pub builder: U256,
    /// Refunded to the protocol.
    pub protocol: U256,
}

impl ValueSplit {
    /// Split `captured` given the builder payment and the share of that
    /// payment refunded to the protocol.
    pub fn compute(
        captured: U256,
        builder_payment: U256,
        protocol_refund_percent: u8,
    ) -> Result<Self, SplitError> {
        if protocol_refund_percent > 100 {
            return Err(SplitError::PercentOutOfRange(protocol_refund_percent));
        }
        if builder_payment > captured {
            return Err(SplitError::PaymentExceedsCapture { captured, payment: builder_payment });
        }

        let kept = U256::from(100 - protocol_refund_percent);
        let builder = builder_payment * kept / U256::from(100);
        let protocol = builder_payment - builder;
        let searcher = captured - builder_payment;

        Ok(Self { searcher, builder, protocol })
    }

    /// The value the split was computed from.
    pub fn total(&self) -> U256 {
        self.searcher + self.builder + self.protocol
    }

    /// The builder payment, i.e. the builder and protocol shares.
    pub fn builder_payment(&self) -> U256 {
        self.builder + self.protocol
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ninety_percent_refund() {
        let split = ValueSplit::compute(U256::from(1000), U256::from(1000), 90).unwrap();
        assert_eq!(split.builder, U256::from(100));
        assert_eq!(split.protocol, U256::from(900));
        assert_eq!(split.searcher, U256::ZERO);
    }

    #[test]
    fn truncates_builder_share() {
        let split = ValueSplit::compute(U256::from(10), U256::from(7), 75).unwrap();
        assert_eq!(split.builder, U256::from(1));
        assert_eq!(split.protocol, U256::from(6));
        assert_eq!(split.searcher, U256::from(3));
        assert_eq!(split.total(), U256::from(10));
        assert_eq!(split.builder_payment(), U256::from(7));
    }

    #[test]
    fn bid_ninety_percent() {
        assert_eq!(builder_bid(U256::from(1000), 90).unwrap(), U256::from(900));
        assert_eq!(builder_bid(U256::from(7), 90).unwrap(), U256::from(6));
        assert_eq!(builder_bid(U256::from(7), 101), Err(SplitError::PercentOutOfRange(101)));
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(
            ValueSplit::compute(U256::from(1), U256::from(2), 50),
            Err(SplitError::PaymentExceedsCapture {
                captured: U256::from(1),
                payment: U256::from(2)
            })
        );
        assert_eq!(
            ValueSplit::compute(U256::from(2), U256::from(1), 101),
            Err(SplitError::PercentOutOfRange(101))
        );
    }

    #[test]
    fn demo_liquidation_split() {
        // 0.01 ETH position, 90% bid, 90% refund.
        let captured = U256::from(10_000_000_000_000_000u64);
        let payment = builder_bid(captured, 90).unwrap();
        let split = ValueSplit::compute(captured, payment, 90).unwrap();
        assert_eq!(split.searcher, U256::from(1_000_000_000_000_000u64));
        assert_eq!(split.builder, U256::from(900_000_000_000_000u64));
        assert_eq!(split.protocol, U256::from(8_100_000_000_000_000u64));
    }

    proptest! {
        #[test]
        fn split_sums_to_captured(
            captured in any::<u128>(),
            payment_seed in any::<u128>(),
            pct in 0u8..=100,
        ) {
            let payment = payment_seed % captured.saturating_add(1);
            let captured = U256::from(captured);
            let payment = U256::from(payment);

            let split = ValueSplit::compute(captured, payment, pct).unwrap();
            prop_assert_eq!(split.total(), captured);
            prop_assert_eq!(split.builder_payment(), payment);
            prop_assert!(split.builder <= payment);
        }
    }
}

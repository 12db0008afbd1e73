//! Fee-market pricing for bundle transactions.

/// Multiplier applied to the latest base fee to obtain the max fee. Doubling
/// absorbs a full block's worth of base fee increase.
pub const BASE_FEE_MULTIPLIER: u128 = 2;

/// Priority fee used when the caller does not request one. Bundles pay the
/// builder directly, so no tip is needed.
pub const DEFAULT_PRIORITY_FEE: u128 = 0;

/// Errors computing [`FeeParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FeeError {
    /// The latest block did not carry a base fee.
    #[error("block did not contain base fee. Is this running on an EIP-1559 network?")]
    MissingBaseFee,
}

/// EIP-1559 gas pricing for a transaction.
///
/// The priority fee never exceeds the max fee. On quiet networks the base fee
/// can be smaller than a fixed tip, so the tip is clamped rather than
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeParams {
    /// Max fee per gas.
    pub max_fee_per_gas: u128,
    /// Max priority fee per gas.
    pub max_priority_fee_per_gas: u128,
}

impl FeeParams {
    /// Price from a known base fee and a desired priority fee.
    pub const fn new(base_fee: u128, desired_priority_fee: u128) -> Self {
        let max_fee_per_gas = base_fee.saturating_mul(BASE_FEE_MULTIPLIER);
        let max_priority_fee_per_gas = if desired_priority_fee < max_fee_per_gas {
            desired_priority_fee
        } else {
            max_fee_per_gas
        };
        Self { max_fee_per_gas, max_priority_fee_per_gas }
    }

    /// Price from the base fee of the latest block, which may be absent on
    /// chains without a fee market.
    pub fn from_base_fee(
        base_fee: Option<u64>,
        desired_priority_fee: u128,
    ) -> Result<Self, FeeError> {
        base_fee
            .map(|base_fee| Self::new(base_fee as u128, desired_priority_fee))
            .ok_or(FeeError::MissingBaseFee)
    }

    /// Price from the latest base fee with [`DEFAULT_PRIORITY_FEE`].
    pub fn with_default_tip(base_fee: Option<u64>) -> Result<Self, FeeError> {
        Self::from_base_fee(base_fee, DEFAULT_PRIORITY_FEE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_base_fee_clamps_tip_to_zero() {
        let fees = FeeParams::new(0, 1_000_000_000);
        assert_eq!(fees.max_fee_per_gas, 0);
        assert_eq!(fees.max_priority_fee_per_gas, 0);
    }

    #[test]
    fn tip_clamped_to_max_fee() {
        let fees = FeeParams::new(10, 50);
        assert_eq!(fees.max_fee_per_gas, 20);
        assert_eq!(fees.max_priority_fee_per_gas, 20);
    }

    #[test]
    fn tip_below_max_fee_is_kept() {
        let fees = FeeParams::new(30, 7);
        assert_eq!(fees, FeeParams { max_fee_per_gas: 60, max_priority_fee_per_gas: 7 });
    }

    #[test]
    fn missing_base_fee() {
        assert_eq!(FeeParams::with_default_tip(None), Err(FeeError::MissingBaseFee));
        assert_eq!(
            FeeParams::with_default_tip(Some(7)).unwrap(),
            FeeParams { max_fee_per_gas: 14, max_priority_fee_per_gas: 0 }
        );
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let fees = FeeParams::new(u128::MAX, u128::MAX);
        assert_eq!(fees.max_fee_per_gas, u128::MAX);
        assert_eq!(fees.max_priority_fee_per_gas, u128::MAX);
    }
}

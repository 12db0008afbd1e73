use crate::OvalLiquidationDemoPriceFeed::setValuesCall;
use alloy::primitives::{aliases::U80, I256, U256};

/// Number of decimals used by the demo price feed.
pub const PRICE_DECIMALS: u8 = 8;

/// Collateral price the feed is reset to before each run, `100.00000000`.
pub const INITIAL_PRICE: i64 = 100_00000000;

/// Collateral price after the update that makes the position liquidatable,
/// a 10% drop from [`INITIAL_PRICE`].
pub const LIQUIDATION_PRICE: i64 = 90_00000000;

/// A single round written to the demo price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRound {
    /// The answer, scaled by [`PRICE_DECIMALS`].
    pub answer: i64,
    /// The round id. Also used as `answeredInRound`.
    pub round_id: u64,
    /// The unix timestamp used for both `startedAt` and `updatedAt`.
    pub updated_at: u64,
}

impl PriceRound {
    /// Create a new round.
    pub const fn new(answer: i64, round_id: u64, updated_at: u64) -> Self {
        Self { answer, round_id, updated_at }
    }

    /// The reset round, round 1 at [`INITIAL_PRICE`].
    pub const fn initial(updated_at: u64) -> Self {
        Self::new(INITIAL_PRICE, 1, updated_at)
    }

    /// The liquidation round, round 2 at [`LIQUIDATION_PRICE`].
    pub const fn liquidation(updated_at: u64) -> Self {
        Self::new(LIQUIDATION_PRICE, 2, updated_at)
    }

    /// Build the `setValues` call writing this round.
    pub fn to_call(&self) -> setValuesCall {
        let round = U80::from(self.round_id);
        let at = U256::from(self.updated_at);
        setValuesCall {
            answer: I256::unchecked_from(self.answer),
            roundId: round,
            startedAt: at,
            updatedAt: at,
            answeredInRound: round,
        }
    }
}

//! The Oval liquidation scenario.
//!
//! A protocol's Oval oracle withholds a price update until it is unlocked.
//! The searcher backruns the unlock with the price update, a liquidation of
//! the now undercollateralised position, and a payment to the builder. The
//! protocol's unlock bundle refunds part of the winning bid back to it.

use crate::{ChainReader, Submission};
use alloy::{
    primitives::{Address, U256},
    signers::Signer,
};
use oval_bundle::{Bundle, BundleBuilder, BundleError, RefundDirective, DEFAULT_HORIZON};
use oval_contracts::{
    ChainlinkOvalImmutable::unlockLatestValueCall, OvalLiquidationDemo::liquidateCall,
    PayBuilder::payBuilderCall, PriceRound,
};
use oval_types::{
    builder_bid, FeeError, FeeParams, ScenarioContracts, SigningError, SplitError,
    TransactionIntent, ValueSplit,
};
use tracing::{info, instrument};

/// Share of the liquidation value the searcher bids to the builder.
pub const BUILDER_BID_PERCENT: u8 = 90;

/// Collateral deposited into the demo position, 0.01 ETH.
pub const COLLATERAL_AMOUNT: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

/// Number of blocks the self-transfer bundle stays eligible for.
pub const SELF_TRANSFER_RANGE: u64 = 10;

/// Gas limit of a plain value transfer.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Errors returned while planning the scenario.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ScenarioError {
    /// Fees could not be derived from the snapshot.
    #[error(transparent)]
    Fee(#[from] FeeError),
    /// The value split is invalid.
    #[error(transparent)]
    Split(#[from] SplitError),
    /// A transaction could not be signed.
    #[error(transparent)]
    Signing(#[from] SigningError),
    /// A bundle could not be built.
    #[error(transparent)]
    Bundle(#[from] BundleError),
}

/// Chain state read once, immediately before building bundles.
///
/// Inner and outer bundles are both built from the same snapshot, so their
/// target block and nonces agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSnapshot {
    /// Latest block number.
    pub block: u64,
    /// Latest base fee.
    pub base_fee: Option<u64>,
    /// Next nonce of the searcher account.
    pub nonce: u64,
}

impl ChainSnapshot {
    /// Read the latest block and the account's nonce.
    pub async fn take<C: ChainReader>(chain: &C, account: Address) -> Result<Self, C::Error> {
        let block = chain.latest_block().await?;
        let nonce = chain.nonce_of(account).await?;
        Ok(Self { block: block.number, base_fee: block.base_fee, nonce })
    }

    /// Fees for transactions built from this snapshot.
    pub fn fees(&self) -> Result<FeeParams, FeeError> {
        FeeParams::with_default_tip(self.base_fee)
    }
}

/// The bundles and accounting of one liquidation.
#[derive(Debug, Clone)]
pub struct LiquidationPlan {
    /// The protocol's unlock bundle, also nested first in [`Self::bundle`].
    pub unlock: Bundle,
    /// The searcher's backrun bundle.
    pub bundle: Bundle,
    /// The collateral captured by the liquidation.
    pub liquidation_value: U256,
    /// How the captured value is split.
    pub split: ValueSplit,
}

impl LiquidationPlan {
    /// Prepare the backrun bundle for the pipeline.
    pub fn into_submission(self) -> Submission {
        Submission::new(self.bundle).with_split(self.split)
    }
}

/// Plans the liquidation scenario.
///
/// The signer plays every role: oracle, protocol, position owner and
/// searcher. Nonces are assigned from one [`ChainSnapshot`] in execution
/// order.
#[derive(Debug, Clone)]
pub struct LiquidationPlanner<S> {
    signer: S,
    contracts: ScenarioContracts,
    chain_id: u64,
    refund_percent: u8,
    bid_percent: u8,
    refund_address: Address,
    horizon: u64,
}

impl<S: Signer + Send + Sync> LiquidationPlanner<S> {
    /// Create a planner refunding `refund_percent` of the bid to the
    /// signer's address.
    pub fn new(signer: S, contracts: ScenarioContracts, chain_id: u64, refund_percent: u8) -> Self {
        let refund_address = signer.address();
        Self {
            signer,
            contracts,
            chain_id,
            refund_percent,
            bid_percent: BUILDER_BID_PERCENT,
            refund_address,
            horizon: DEFAULT_HORIZON,
        }
    }

    /// Set the share of the liquidation value bid to the builder.
    pub const fn with_bid_percent(mut self, bid_percent: u8) -> Self {
        self.bid_percent = bid_percent;
        self
    }

    /// Set the protocol refund address.
    pub const fn with_refund_address(mut self, refund_address: Address) -> Self {
        self.refund_address = refund_address;
        self
    }

    /// Set the inclusion horizon of both bundles.
    pub const fn with_horizon(mut self, horizon: u64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Get a reference to the signer.
    pub const fn signer(&self) -> &S {
        &self.signer
    }

    fn intent(&self, to: Address, nonce: u64, fees: FeeParams) -> TransactionIntent {
        TransactionIntent::new(self.signer.address(), to, self.chain_id)
            .with_nonce(nonce)
            .with_fees(fees)
    }

    /// Build the protocol's unlock bundle at the snapshot's nonce.
    pub async fn unlock_bundle(&self, snapshot: &ChainSnapshot) -> Result<Bundle, ScenarioError> {
        let fees = snapshot.fees()?;
        let unlock = self
            .intent(self.contracts.oval, snapshot.nonce, fees)
            .with_call(&unlockLatestValueCall {})
            .sign(&self.signer)
            .await?;

        BundleBuilder::new(snapshot.block)
            .with_horizon(self.horizon)
            .with_tx(unlock)
            .with_refund(RefundDirective::to_recipient(self.refund_address, 100))
            .with_full_privacy()
            .build()
            .map_err(Into::into)
    }

    /// Plan the liquidation of `owner`'s position worth `liquidation_value`.
    ///
    /// `timestamp` is the update time written to the price feed.
    #[instrument(skip_all, fields(block = snapshot.block, nonce = snapshot.nonce))]
    pub async fn plan(
        &self,
        snapshot: &ChainSnapshot,
        liquidation_value: U256,
        owner: Address,
        timestamp: u64,
    ) -> Result<LiquidationPlan, ScenarioError> {
        let fees = snapshot.fees()?;
        let n = snapshot.nonce;

        let payment = builder_bid(liquidation_value, self.bid_percent)?;
        let split = ValueSplit::compute(liquidation_value, payment, self.refund_percent)?;

        let unlock = self.unlock_bundle(snapshot).await?;

        let price_update = self
            .intent(self.contracts.price_feed, n + 1, fees)
            .with_call(&PriceRound::liquidation(timestamp).to_call())
            .sign(&self.signer)
            .await?;
        let liquidate = self
            .intent(self.contracts.liquidation_demo, n + 2, fees)
            .with_call(&liquidateCall { user: owner })
            .sign(&self.signer)
            .await?;
        let pay_builder = self
            .intent(self.contracts.pay_builder, n + 3, fees)
            .with_value(payment)
            .with_call(&payBuilderCall {})
            .sign(&self.signer)
            .await?;

        let bundle = BundleBuilder::new(snapshot.block)
            .with_horizon(self.horizon)
            .with_bundle(unlock.clone())
            .with_tx(price_update)
            .with_tx(liquidate)
            .with_tx(pay_builder)
            .with_refund(RefundDirective::for_entry(0, self.refund_percent))
            .with_full_privacy()
            .build()?;

        info!(
            liquidation_value = %liquidation_value,
            searcher = %split.searcher,
            builder = %split.builder,
            protocol = %split.protocol,
            "Liquidation found!"
        );

        Ok(LiquidationPlan { unlock, bundle, liquidation_value, split })
    }
}

/// Build a bundle sending 1 wei from the signer to itself, targeting the
/// block after the snapshot.
pub async fn self_transfer<S>(
    signer: &S,
    chain_id: u64,
    snapshot: &ChainSnapshot,
) -> Result<Bundle, ScenarioError>
where
    S: Signer + Send + Sync + ?Sized,
{
    let address = signer.address();
    let tx = TransactionIntent::new(address, address, chain_id)
        .with_nonce(snapshot.nonce)
        .with_value(U256::from(1))
        .with_gas_limit(TRANSFER_GAS_LIMIT)
        .with_fees(snapshot.fees()?)
        .sign(signer)
        .await?;

    BundleBuilder::new(snapshot.block + 1)
        .with_horizon(SELF_TRANSFER_RANGE)
        .with_tx(tx)
        .build()
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{consensus::Transaction, sol_types::SolCall};
    use oval_bundle::{BundleItem, Refund, RefundConfig};
    use oval_types::test_utils::{TEST_CHAIN_ID, TEST_CONTRACTS, TEST_SIGNERS, TEST_USERS};

    const SNAPSHOT: ChainSnapshot = ChainSnapshot { block: 100, base_fee: Some(7), nonce: 12 };

    fn planner() -> LiquidationPlanner<alloy::signers::local::PrivateKeySigner> {
        LiquidationPlanner::new(TEST_SIGNERS[0].clone(), TEST_CONTRACTS, TEST_CHAIN_ID, 90)
    }

    #[test]
    fn collateral_is_a_hundredth_of_an_ether() {
        assert_eq!(COLLATERAL_AMOUNT, U256::from(10).pow(U256::from(16)));
    }

    #[tokio::test]
    async fn plan_layout() {
        let plan = planner()
            .plan(&SNAPSHOT, COLLATERAL_AMOUNT, TEST_USERS[0], 1_700_000_000)
            .await
            .unwrap();

        // The unlock bundle is nested first and refunds the protocol in full.
        let entries = plan.bundle.entries();
        assert_eq!(entries.len(), 4);
        assert!(matches!(
            &entries[0],
            BundleItem::Bundle { bundle } if bundle == plan.unlock.request()
        ));
        assert_eq!(
            plan.unlock.refund().and_then(|validity| validity.refund_config.clone()),
            Some(vec![RefundConfig { address: TEST_USERS[0], percent: 100 }])
        );
        assert_eq!(
            plan.bundle.refund().and_then(|validity| validity.refund.clone()),
            Some(vec![Refund { body_idx: 0, percent: 90 }])
        );
        assert!(plan.bundle.privacy().is_some());
        assert_eq!(plan.bundle.inclusion().block(), 100);
        assert_eq!(plan.bundle.inclusion().max_block(), 125);
        assert_eq!(plan.unlock.inclusion(), plan.bundle.inclusion());

        plan.bundle.check_nonce_order().unwrap();

        let txs: Vec<_> = plan
            .bundle
            .flatten()
            .into_iter()
            .map(|(tx, can_revert)| {
                assert!(!can_revert);
                tx.recover().unwrap()
            })
            .collect();
        let nonces: Vec<_> = txs.iter().map(|(_, tx)| tx.nonce()).collect();
        assert_eq!(nonces, vec![12, 13, 14, 15]);

        let recipients: Vec<_> = txs.iter().map(|(_, tx)| tx.to().unwrap()).collect();
        assert_eq!(recipients, TEST_CONTRACTS.all().to_vec());

        for (sender, tx) in &txs {
            assert_eq!(*sender, TEST_USERS[0]);
            assert_eq!(tx.max_fee_per_gas(), 14);
            assert_eq!(tx.max_priority_fee_per_gas(), Some(0));
        }

        assert_eq!(txs[0].1.input().as_ref(), unlockLatestValueCall {}.abi_encode().as_slice());
        assert_eq!(
            txs[2].1.input().as_ref(),
            liquidateCall { user: TEST_USERS[0] }.abi_encode().as_slice()
        );

        // 90% of 0.01 ETH goes to the builder, 90% of that back to the
        // protocol.
        let payment = COLLATERAL_AMOUNT * U256::from(90) / U256::from(100);
        assert_eq!(txs[3].1.value(), payment);
        assert_eq!(plan.split.searcher, COLLATERAL_AMOUNT - payment);
        assert_eq!(plan.split.builder, payment / U256::from(10));
        assert_eq!(plan.split.protocol, payment - payment / U256::from(10));
        assert_eq!(plan.split.total(), COLLATERAL_AMOUNT);
    }

    #[tokio::test]
    async fn plan_requires_base_fee() {
        let snapshot = ChainSnapshot { base_fee: None, ..SNAPSHOT };
        let err = planner().plan(&snapshot, COLLATERAL_AMOUNT, TEST_USERS[0], 0).await.unwrap_err();
        assert!(matches!(err, ScenarioError::Fee(FeeError::MissingBaseFee)));
    }

    #[tokio::test]
    async fn self_transfer_bundle() {
        let bundle = self_transfer(&TEST_SIGNERS[1], TEST_CHAIN_ID, &SNAPSHOT).await.unwrap();
        assert_eq!(bundle.inclusion().block(), 101);
        assert_eq!(bundle.inclusion().max_block(), 111);
        assert!(bundle.privacy().is_none());
        assert!(bundle.refund().is_none());

        let flat = bundle.flatten();
        assert_eq!(flat.len(), 1);
        let (sender, tx) = flat[0].0.recover().unwrap();
        assert_eq!(sender, TEST_USERS[1]);
        assert_eq!(tx.to(), Some(TEST_USERS[1]));
        assert_eq!(tx.value(), U256::from(1));
        assert_eq!(tx.nonce(), 12);
        assert_eq!(tx.gas_limit(), TRANSFER_GAS_LIMIT);
    }
}

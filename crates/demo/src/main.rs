//! Runs the Oval liquidation scenario end to end.
//!
//! The configured key plays every role. It resets the demo price feed,
//! opens a collateralised position, then backruns the protocol's price
//! unlock with a liquidation of that position through MEV-Share.

use alloy::primitives::U256;
use oval_contracts::{
    ChainlinkOvalImmutable::unlockLatestValueCall,
    OvalLiquidationDemo::updateCollateralisedPositionCall, PriceRound,
};
use oval_demo::{
    connect, init_tracing, load_config, position_value, relay_client, shutdown_token, snapshot,
    transact, unix_now,
};
use oval_searcher::{
    InclusionObserver, LiquidationPlanner, PipelineOutcome, RpcChain, SubmissionPipeline,
    WatcherOptions, COLLATERAL_AMOUNT,
};
use oval_types::sim_rejection;
use std::time::Duration;
use tracing::{info, warn};

/// Give up on the relay once the bundle's inclusion window has passed.
const CONFIRMATION_DEADLINE: Duration = Duration::from_secs(25 * 12);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();

    let config = load_config()?;
    let contracts = config.contracts();
    let signer = config.signer().clone();
    let owner = signer.address();
    let provider = connect(&config)?;
    info!(chain_id = config.chain_id(), %owner, relay = config.relay_url(), "starting");

    // Reset the feed to its initial price and let Oval release it.
    let initial = PriceRound::initial(unix_now()?).to_call();
    transact(&provider, contracts.price_feed, &initial, U256::ZERO).await?;
    transact(&provider, contracts.oval, &unlockLatestValueCall {}, U256::ZERO).await?;

    // Open the position the liquidation price will make unsafe.
    let open_position = updateCollateralisedPositionCall {};
    transact(&provider, contracts.liquidation_demo, &open_position, COLLATERAL_AMOUNT).await?;

    let liquidation_value = position_value(&provider, contracts.liquidation_demo, owner).await?;
    info!(%liquidation_value, "position opened");

    let chain = RpcChain::new(provider.clone());
    let snapshot = snapshot(&chain, owner).await?;
    let planner =
        LiquidationPlanner::new(signer, contracts, config.chain_id(), config.refund_percent());
    let plan = planner.plan(&snapshot, liquidation_value, owner, unix_now()?).await?;

    let pipeline = SubmissionPipeline::new(relay_client(&config)?)
        .with_options(WatcherOptions::new().with_deadline(CONFIRMATION_DEADLINE))
        .with_cancel_token(shutdown_token());

    match pipeline.run(&plan.into_submission()).await? {
        PipelineOutcome::Confirmed { receipt, event } => {
            info!(bundle_hash = %receipt.bundle_hash, "bundle seen by the relay");
            let hashes: Vec<_> =
                event.as_bundle().map(|bundle| bundle.tx_hashes().collect()).unwrap_or_default();
            let observations = InclusionObserver::new(chain, contracts).observe(hashes).await;
            let mined = observations.iter().filter(|obs| obs.is_mined()).count();
            info!(mined, observed = observations.len(), "done");
        }
        PipelineOutcome::Aborted { report } => {
            warn!(reason = sim_rejection(&report).unwrap_or_default(), "simulation failed");
        }
        outcome => warn!(state = ?outcome.state(), "bundle not confirmed"),
    }

    Ok(())
}

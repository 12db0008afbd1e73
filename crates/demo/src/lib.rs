//! Shared setup for the demo binaries.

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

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};
use eyre::{eyre, WrapErr};
use oval_contracts::OvalLiquidationDemo;
use oval_relay::MevShareClient;
use oval_searcher::{ChainReader, ChainSnapshot};
use oval_types::OvalConfig;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

/// Install the log subscriber. Defaults to `info` when `RUST_LOG` is unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load the configuration from the environment.
pub fn load_config() -> eyre::Result<OvalConfig> {
    OvalConfig::from_env().wrap_err("invalid configuration")
}

/// Connect to the configured node, signing with the configured key.
pub fn connect(config: &OvalConfig) -> eyre::Result<impl Provider + Clone + 'static> {
    let url = config.node_url().parse().wrap_err("invalid node url")?;
    Ok(ProviderBuilder::new()
        .with_chain_id(config.chain_id())
        .wallet(EthereumWallet::new(config.signer().clone()))
        .connect_http(url))
}

/// Build a relay client for the configured endpoints.
pub fn relay_client(config: &OvalConfig) -> eyre::Result<MevShareClient> {
    MevShareClient::new_from_strings(
        config.relay_url(),
        config.stream_url(),
        config.signer().clone(),
    )
    .wrap_err("invalid relay endpoints")
}

/// A token cancelled on ctrl-c.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling");
            child.cancel();
        }
    });
    token
}

/// Seconds since the unix epoch.
pub fn unix_now() -> eyre::Result<u64> {
    u64::try_from(chrono::Utc::now().timestamp()).wrap_err("clock before unix epoch")
}

/// Send `call` to `to` with `value` attached and wait for it to be mined
/// successfully.
#[instrument(skip_all, fields(%to, call = C::SIGNATURE))]
pub async fn transact<P, C>(provider: &P, to: Address, call: &C, value: U256) -> eyre::Result<()>
where
    P: Provider,
    C: SolCall,
{
    let tx = TransactionRequest::default().with_to(to).with_call(call).with_value(value);
    let receipt = provider.send_transaction(tx).await?.get_receipt().await?;
    if !receipt.status() {
        return Err(eyre!("{} reverted in {}", C::SIGNATURE, receipt.transaction_hash));
    }
    info!(tx_hash = %receipt.transaction_hash, "setup transaction mined");
    Ok(())
}

/// The collateral held by `owner` in the demo market.
pub async fn position_value<P: Provider>(
    provider: &P,
    market: Address,
    owner: Address,
) -> eyre::Result<U256> {
    let value = OvalLiquidationDemo::new(market, provider).ethBalances(owner).call().await?;
    Ok(value)
}

/// Take the chain snapshot all bundles are built from.
pub async fn snapshot<C>(chain: &C, account: Address) -> eyre::Result<ChainSnapshot>
where
    C: ChainReader,
{
    let snapshot = ChainSnapshot::take(chain, account).await?;
    info!(
        block = snapshot.block,
        base_fee = ?snapshot.base_fee,
        nonce = snapshot.nonce,
        "chain snapshot taken"
    );
    Ok(snapshot)
}

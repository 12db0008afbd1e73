//! Sends a bundle moving 1 wei from the configured account to itself.

use oval_demo::{connect, init_tracing, load_config, relay_client, snapshot};
use oval_searcher::{self_transfer, RpcChain};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();

    let config = load_config()?;
    let signer = config.signer();
    let chain = RpcChain::new(connect(&config)?);

    let snapshot = snapshot(&chain, signer.address()).await?;
    let bundle = self_transfer(signer, config.chain_id(), &snapshot).await?;

    let receipt = relay_client(&config)?.send_bundle(&bundle).await?;
    info!(
        bundle_hash = %receipt.bundle_hash,
        block = bundle.inclusion().block(),
        max_block = bundle.inclusion().max_block(),
        "bundle sent"
    );
    Ok(())
}

use crate::{ChainReader, TxReceipt};
use alloy::primitives::TxHash;
use oval_types::ScenarioContracts;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

/// The result of waiting for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// The transaction hash.
    pub hash: TxHash,
    /// The receipt, or why none was obtained.
    pub result: Result<TxReceipt, String>,
    /// What the transaction did, derived from its recipient.
    pub label: &'static str,
}

impl Observation {
    /// True if the transaction was mined.
    pub const fn is_mined(&self) -> bool {
        self.result.is_ok()
    }
}

/// Waits for the transactions of a confirmed bundle to be mined.
///
/// Every transaction is watched by its own task. A failure is logged and
/// reported for that transaction only.
#[derive(Debug, Clone)]
pub struct InclusionObserver<C> {
    chain: C,
    contracts: ScenarioContracts,
}

impl<C> InclusionObserver<C> {
    /// Create a new observer.
    pub const fn new(chain: C, contracts: ScenarioContracts) -> Self {
        Self { chain, contracts }
    }

    /// Get a reference to the chain reader.
    pub const fn chain(&self) -> &C {
        &self.chain
    }
}

impl<C> InclusionObserver<C>
where
    C: ChainReader + Clone + Send + Sync + 'static,
{
    /// Wait for each transaction, returning one observation per hash in the
    /// order given. A task that dies without reporting yields a failed
    /// observation for its hash.
    #[instrument(skip_all)]
    pub async fn observe(&self, hashes: impl IntoIterator<Item = TxHash>) -> Vec<Observation> {
        let hashes: Vec<TxHash> = hashes.into_iter().collect();
        let mut tasks = JoinSet::new();

        for (index, hash) in hashes.iter().copied().enumerate() {
            let chain = self.chain.clone();
            let contracts = self.contracts;

            tasks.spawn(async move {
                let observation = match chain.wait_for_transaction(hash).await {
                    Ok(receipt) => {
                        let label = contracts.label(receipt.to);
                        info!(%hash, label, success = receipt.success, "{label} tx mined");
                        Observation { hash, result: Ok(receipt), label }
                    }
                    Err(err) => {
                        warn!(%hash, %err, "failed to observe transaction");
                        let label = contracts.label(None);
                        Observation { hash, result: Err(err.to_string()), label }
                    }
                };
                (index, observation)
            });
        }

        let mut observations: Vec<Option<Observation>> = vec![None; hashes.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, observation)) => observations[index] = Some(observation),
                Err(err) => warn!(%err, "observation task failed"),
            }
        }

        observations
            .into_iter()
            .zip(hashes)
            .map(|(observation, hash)| {
                observation.unwrap_or_else(|| Observation {
                    hash,
                    result: Err("task failed".to_owned()),
                    label: self.contracts.label(None),
                })
            })
            .collect()
    }
}

//! Builders for relay stream events.
use alloy::primitives::{Address, B256};
use oval_types::{EventTransaction, PendingBundle, PendingEvent, PendingTransaction};

/// A bundle event with the given identity and one transaction per hash.
pub fn bundle_event(hash: B256, tx_hashes: impl IntoIterator<Item = B256>) -> PendingEvent {
    let txs = tx_hashes
        .into_iter()
        .map(|hash| EventTransaction { hash: Some(hash), ..Default::default() })
        .collect();
    PendingEvent::Bundle(PendingBundle { hash, txs })
}

/// A bundle event whose transactions expose only their recipients.
pub fn bundle_event_to(hash: B256, recipients: impl IntoIterator<Item = Address>) -> PendingEvent {
    let txs = recipients
        .into_iter()
        .map(|to| EventTransaction { to: Some(to), ..Default::default() })
        .collect();
    PendingEvent::Bundle(PendingBundle { hash, txs })
}

/// A transaction event sent to `to`.
pub fn transaction_event(hash: B256, to: Address) -> PendingEvent {
    PendingEvent::Transaction(PendingTransaction {
        hash,
        tx: EventTransaction { hash: Some(hash), to: Some(to), ..Default::default() },
    })
}

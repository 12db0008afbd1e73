//! Relay event stream model.
//!
//! The relay broadcasts a sanitized notification for every transaction or
//! bundle it receives. Events are ephemeral; they are matched against what
//! the searcher submitted and then dropped.

use alloy::primitives::{Address, Bytes, FixedBytes, B256};
use serde::{Deserialize, Serialize};

/// The kind of event a subscriber asks the relay for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Single pending transactions.
    Transaction,
    /// Pending bundles.
    Bundle,
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transaction => f.write_str("transaction"),
            Self::Bundle => f.write_str("bundle"),
        }
    }
}

/// A transaction reference enumerated by a relay event. Every field is
/// optional, the relay only discloses what the sender's hints allow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTransaction {
    /// The transaction hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<B256>,
    /// The recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// The 4-byte function selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_selector: Option<FixedBytes<4>>,
    /// The calldata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_data: Option<Bytes>,
}

/// A raw event as it appears on the stream.
///
/// Unknown fields such as `logs` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Event hash.
    pub hash: B256,
    /// Enumerated transactions. The relay sends `null` for bare
    /// transaction events.
    #[serde(default)]
    pub txs: Option<Vec<EventTransaction>>,
}

/// A pending single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    /// The event hash.
    pub hash: B256,
    /// What the relay disclosed about the transaction.
    pub tx: EventTransaction,
}

/// A pending bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBundle {
    /// The event hash.
    pub hash: B256,
    /// Constituent transactions, in execution order.
    pub txs: Vec<EventTransaction>,
}

impl PendingBundle {
    /// Recipients disclosed for the constituent transactions.
    pub fn recipients(&self) -> impl Iterator<Item = Address> + '_ {
        self.txs.iter().filter_map(|tx| tx.to)
    }

    /// Transaction hashes disclosed for the constituent transactions.
    pub fn tx_hashes(&self) -> impl Iterator<Item = B256> + '_ {
        self.txs.iter().filter_map(|tx| tx.hash)
    }
}

/// A relay stream notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingEvent {
    /// A single transaction.
    Transaction(PendingTransaction),
    /// A bundle.
    Bundle(PendingBundle),
}

impl PendingEvent {
    /// The event hash.
    pub const fn hash(&self) -> B256 {
        match self {
            Self::Transaction(tx) => tx.hash,
            Self::Bundle(bundle) => bundle.hash,
        }
    }

    /// The kind of event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Transaction(_) => EventKind::Transaction,
            Self::Bundle(_) => EventKind::Bundle,
        }
    }

    /// Get the bundle, if this is a bundle event.
    pub const fn as_bundle(&self) -> Option<&PendingBundle> {
        match self {
            Self::Bundle(bundle) => Some(bundle),
            Self::Transaction(_) => None,
        }
    }
}

impl From<StreamEvent> for PendingEvent {
    /// Events that enumerate more than one transaction are bundles.
    fn from(event: StreamEvent) -> Self {
        let mut txs = event.txs.unwrap_or_default();
        if txs.len() > 1 {
            Self::Bundle(PendingBundle { hash: event.hash, txs })
        } else {
            let tx = txs.pop().unwrap_or_default();
            Self::Transaction(PendingTransaction { hash: event.hash, tx })
        }
    }
}

/// Compare two hex addresses, ignoring ASCII case and the `0x` prefix.
pub fn addresses_eq(a: &str, b: &str) -> bool {
    fn strip(s: &str) -> &str {
        s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
    }
    strip(a).eq_ignore_ascii_case(strip(b))
}

/// Decides whether a [`PendingEvent`] is the one a searcher is waiting for.
///
/// Addresses are compared as parsed [`Address`] values, so checksum casing
/// never affects a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMatcher {
    bundle_hash: Option<B256>,
    tracked: Vec<Address>,
    recipient: Option<Address>,
}

impl EventMatcher {
    /// Match the bundle event with the given identity.
    pub fn bundle(identity: B256) -> Self {
        Self { bundle_hash: Some(identity), ..Default::default() }
    }

    /// Match transaction events sent to the given address.
    pub fn transaction_to(recipient: Address) -> Self {
        Self { recipient: Some(recipient), ..Default::default() }
    }

    /// Set the expected bundle identity.
    pub const fn with_bundle_hash(mut self, identity: B256) -> Self {
        self.bundle_hash = Some(identity);
        self
    }

    /// Require bundle events to touch at least one of these addresses.
    pub fn tracking(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        self.tracked.extend(addresses);
        self
    }

    /// The expected bundle identity, if known.
    pub const fn bundle_hash(&self) -> Option<B256> {
        self.bundle_hash
    }

    /// The tracked addresses.
    pub fn tracked(&self) -> &[Address] {
        &self.tracked
    }

    /// The kind of event this matcher wants.
    pub const fn kind(&self) -> EventKind {
        if self.recipient.is_some() && self.bundle_hash.is_none() {
            EventKind::Transaction
        } else {
            EventKind::Bundle
        }
    }

    /// True if the event is the one being waited for.
    pub fn matches(&self, event: &PendingEvent) -> bool {
        match event {
            PendingEvent::Bundle(bundle) => {
                if self.bundle_hash.is_none() && self.tracked.is_empty() {
                    return false;
                }
                let hash_ok = self.bundle_hash.map_or(true, |hash| hash == bundle.hash);
                let tracked_ok = self.tracked.is_empty()
                    || bundle.recipients().any(|to| self.tracked.contains(&to));
                hash_ok && tracked_ok
            }
            PendingEvent::Transaction(pending) => {
                self.recipient.is_some_and(|recipient| pending.tx.to == Some(recipient))
            }
        }
    }
}

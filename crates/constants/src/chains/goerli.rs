//! Constants for the Goerli network.

use crate::RelayEndpoints;

/// Name of the network.
pub const NAME: &str = "Goerli";
/// Chain ID of the network.
pub const CHAIN_ID: u64 = 5;
/// MEV-Share JSON-RPC relay URL.
pub const RELAY_URL: &str = "https://relay-goerli.flashbots.net";
/// MEV-Share server-sent event stream URL.
pub const STREAM_URL: &str = "https://mev-share-goerli.flashbots.net";

/// Relay endpoints for the Goerli network.
pub const GOERLI_ENDPOINTS: RelayEndpoints = RelayEndpoints::new(RELAY_URL, STREAM_URL);

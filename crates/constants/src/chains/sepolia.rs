//! Constants for the Sepolia network.

use crate::RelayEndpoints;

/// Name of the network.
pub const NAME: &str = "Sepolia";
/// Chain ID of the network.
pub const CHAIN_ID: u64 = 11155111;
/// MEV-Share JSON-RPC relay URL.
pub const RELAY_URL: &str = "https://relay-sepolia.flashbots.net";
/// MEV-Share server-sent event stream URL.
pub const STREAM_URL: &str = "https://mev-share-sepolia.flashbots.net";

/// Relay endpoints for the Sepolia network.
pub const SEPOLIA_ENDPOINTS: RelayEndpoints = RelayEndpoints::new(RELAY_URL, STREAM_URL);

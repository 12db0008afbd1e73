//! Constants for the Mainnet network.

use crate::RelayEndpoints;

/// Name of the network.
pub const NAME: &str = "Mainnet";
/// Chain ID of the network.
pub const CHAIN_ID: u64 = 1;
/// MEV-Share JSON-RPC relay URL.
pub const RELAY_URL: &str = "https://relay.flashbots.net";
/// MEV-Share server-sent event stream URL.
pub const STREAM_URL: &str = "https://mev-share.flashbots.net";

/// Relay endpoints for the Mainnet network.
pub const MAINNET_ENDPOINTS: RelayEndpoints = RelayEndpoints::new(RELAY_URL, STREAM_URL);

//! Constants for the Holesky network.

use crate::RelayEndpoints;

/// Name of the network.
pub const NAME: &str = "Holesky";
/// Chain ID of the network.
pub const CHAIN_ID: u64 = 17000;
/// MEV-Share JSON-RPC relay URL.
pub const RELAY_URL: &str = "https://relay-holesky.flashbots.net";
/// MEV-Share server-sent event stream URL.
pub const STREAM_URL: &str = "https://mev-share-holesky.flashbots.net";

/// Relay endpoints for the Holesky network.
pub const HOLESKY_ENDPOINTS: RelayEndpoints = RelayEndpoints::new(RELAY_URL, STREAM_URL);

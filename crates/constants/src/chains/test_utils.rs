//! Constants for local tests.

use crate::RelayEndpoints;

/// Chain ID used in tests.
pub const TEST_CHAIN_ID: u64 = 31337;
/// Relay URL used in tests. Nothing listens here.
pub const TEST_RELAY_URL: &str = "http://127.0.0.1:18545";
/// Event stream URL used in tests. Nothing listens here.
pub const TEST_STREAM_URL: &str = "http://127.0.0.1:18546";

/// Relay endpoints for tests.
pub const TEST_ENDPOINTS: RelayEndpoints = RelayEndpoints::new(TEST_RELAY_URL, TEST_STREAM_URL);

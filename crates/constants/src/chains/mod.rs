/// Mainnet relay constants.
pub mod mainnet;

/// Goerli testnet relay constants.
#[deprecated(note = "Goerli is shut down, use Sepolia or Holesky")]
pub mod goerli;

/// Holesky testnet relay constants.
pub mod holesky;

/// Sepolia testnet relay constants.
pub mod sepolia;

/// Test utilities for chains.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod chains;
pub use chains::{KnownChains, ParseChainError};

mod endpoints;
pub use endpoints::RelayEndpoints;

#![allow(deprecated)]

use crate::{goerli, holesky, mainnet, sepolia, RelayEndpoints};
use std::str::FromStr;

/// The list of known chains as a string.
const KNOWN_CHAINS: &str = "mainnet, goerli, holesky, sepolia";

/// Error type for parsing a [`KnownChains`] from a name or chain id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseChainError {
    /// The chain name is not supported.
    #[error("chain name {0} is not parseable. supported chains: {KNOWN_CHAINS}")]
    ChainNotSupported(String),
    /// The chain id is not supported.
    #[error("chain id {0} has no known MEV-Share relay. supported chains: {KNOWN_CHAINS}")]
    ChainIdNotSupported(u64),
}

/// Networks with a known MEV-Share deployment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KnownChains {
    /// Ethereum mainnet.
    Mainnet,
    /// Goerli testnet.
    Goerli,
    /// Holesky testnet.
    Holesky,
    /// Sepolia testnet.
    Sepolia,
    /// Local test chain.
    #[cfg(any(test, feature = "test-utils"))]
    Test,
}

impl KnownChains {
    /// Get the chain id.
    pub const fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => mainnet::CHAIN_ID,
            Self::Goerli => goerli::CHAIN_ID,
            Self::Holesky => holesky::CHAIN_ID,
            Self::Sepolia => sepolia::CHAIN_ID,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test => crate::test_utils::TEST_CHAIN_ID,
        }
    }

    /// Get the relay endpoints.
    pub const fn endpoints(&self) -> RelayEndpoints {
        match self {
            Self::Mainnet => mainnet::MAINNET_ENDPOINTS,
            Self::Goerli => goerli::GOERLI_ENDPOINTS,
            Self::Holesky => holesky::HOLESKY_ENDPOINTS,
            Self::Sepolia => sepolia::SEPOLIA_ENDPOINTS,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test => crate::test_utils::TEST_ENDPOINTS,
        }
    }
}

impl FromStr for KnownChains {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            #[cfg(any(test, feature = "test-utils"))]
            "test" => Ok(Self::Test),
            "mainnet" => Ok(Self::Mainnet),
            "goerli" => Ok(Self::Goerli),
            "holesky" => Ok(Self::Holesky),
            "sepolia" => Ok(Self::Sepolia),
            _ => Err(ParseChainError::ChainNotSupported(s)),
        }
    }
}

impl TryFrom<u64> for KnownChains {
    type Error = ParseChainError;

    fn try_from(chain_id: u64) -> Result<Self, Self::Error> {
        match chain_id {
            mainnet::CHAIN_ID => Ok(Self::Mainnet),
            goerli::CHAIN_ID => Ok(Self::Goerli),
            holesky::CHAIN_ID => Ok(Self::Holesky),
            sepolia::CHAIN_ID => Ok(Self::Sepolia),
            #[cfg(any(test, feature = "test-utils"))]
            crate::test_utils::TEST_CHAIN_ID => Ok(Self::Test),
            _ => Err(ParseChainError::ChainIdNotSupported(chain_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("Mainnet".parse::<KnownChains>().unwrap(), KnownChains::Mainnet);
        assert_eq!(" sepolia ".parse::<KnownChains>().unwrap(), KnownChains::Sepolia);
        assert!(matches!(
            "optimism".parse::<KnownChains>(),
            Err(ParseChainError::ChainNotSupported(_))
        ));
    }

    #[test]
    fn chain_id_roundtrip() {
        for chain in
            [KnownChains::Mainnet, KnownChains::Goerli, KnownChains::Holesky, KnownChains::Sepolia]
        {
            assert_eq!(KnownChains::try_from(chain.chain_id()).unwrap(), chain);
        }
        assert_eq!(KnownChains::try_from(10), Err(ParseChainError::ChainIdNotSupported(10)));
    }

    #[test]
    fn goerli_endpoints() {
        let endpoints = KnownChains::Goerli.endpoints();
        assert_eq!(endpoints.relay(), "https://relay-goerli.flashbots.net");
        assert_eq!(endpoints.stream(), "https://mev-share-goerli.flashbots.net");
    }
}

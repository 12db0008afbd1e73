mod error;
pub use error::ConfigError;

/// Helpers for reading typed values from the environment.
pub mod env_utils;
use env_utils::{load_address, load_percent, load_string, load_u64, load_url, load_url_opt};

use alloy::{
    primitives::Address,
    signers::{local::PrivateKeySigner, Signer},
};
use oval_constants::KnownChains;
use std::borrow::Cow;

/// Chain id of the target network.
pub const CHAIN_ID: &str = "CHAIN_ID";
/// Prefix of the node URL variable. The chain id is appended, e.g.
/// `NODE_URL_11155111`.
pub const NODE_URL_PREFIX: &str = "NODE_URL_";
/// Signer key, also used to authenticate relay requests.
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
/// The Oval wrapper around the Chainlink feed.
pub const CHAINLINK_OVAL_IMMUTABLE_ADDRESS: &str = "CHAINLINK_OVAL_IMMUTABLE_ADDRESS";
/// The demo price feed read by Oval.
pub const OVAL_LIQUIDATION_DEMO_PRICE_FEED_ADDRESS: &str =
    "OVAL_LIQUIDATION_DEMO_PRICE_FEED_ADDRESS";
/// The demo money market holding the liquidatable position.
pub const OVAL_LIQUIDATION_DEMO_ADDRESS: &str = "OVAL_LIQUIDATION_DEMO_ADDRESS";
/// The contract forwarding its value to the block builder.
pub const PAY_BUILDER_ADDRESS: &str = "PAY_BUILDER_ADDRESS";
/// Share of the winning bid refunded to the protocol.
pub const PROTOCOL_REFUND_PERCENT: &str = "PROTOCOL_REFUND_PERCENT";
/// Optional relay JSON-RPC endpoint override.
pub const MEV_SHARE_RELAY_URL: &str = "MEV_SHARE_RELAY_URL";
/// Optional relay event stream override.
pub const MEV_SHARE_STREAM_URL: &str = "MEV_SHARE_STREAM_URL";

/// Addresses of the contracts taking part in the liquidation scenario.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScenarioContracts {
    /// The Oval oracle, unlocked by the protocol's bundle.
    pub oval: Address,
    /// The demo price feed behind Oval.
    pub price_feed: Address,
    /// The demo money market.
    pub liquidation_demo: Address,
    /// The builder payment contract.
    pub pay_builder: Address,
}

impl ScenarioContracts {
    /// Create a new set of scenario contracts.
    pub const fn new(
        oval: Address,
        price_feed: Address,
        liquidation_demo: Address,
        pay_builder: Address,
    ) -> Self {
        Self { oval, price_feed, liquidation_demo, pay_builder }
    }

    /// Load the contract addresses from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            oval: load_address(CHAINLINK_OVAL_IMMUTABLE_ADDRESS)?,
            price_feed: load_address(OVAL_LIQUIDATION_DEMO_PRICE_FEED_ADDRESS)?,
            liquidation_demo: load_address(OVAL_LIQUIDATION_DEMO_ADDRESS)?,
            pay_builder: load_address(PAY_BUILDER_ADDRESS)?,
        })
    }

    /// All addresses, in scenario execution order.
    pub const fn all(&self) -> [Address; 4] {
        [self.oval, self.price_feed, self.liquidation_demo, self.pay_builder]
    }

    /// Human readable label for a transaction recipient.
    pub fn label(&self, to: Option<Address>) -> &'static str {
        match to {
            Some(to) if to == self.oval => "Price unlock",
            Some(to) if to == self.price_feed => "Price feed update",
            Some(to) if to == self.liquidation_demo => "Liquidate",
            Some(to) if to == self.pay_builder => "Pay builder",
            _ => "Unknown",
        }
    }
}

/// Searcher configuration.
///
/// Every field is required; a missing value is a startup error and is never
/// recovered from at runtime.
#[derive(Debug, Clone)]
pub struct OvalConfig {
    chain_id: u64,
    node_url: Cow<'static, str>,
    relay_url: Cow<'static, str>,
    stream_url: Cow<'static, str>,
    signer: PrivateKeySigner,
    contracts: ScenarioContracts,
    refund_percent: u8,
}

impl OvalConfig {
    /// Load the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let chain_id = load_u64(CHAIN_ID)?;
        let node_url = load_url(&format!("{NODE_URL_PREFIX}{chain_id}"))?;
        let signer: PrivateKeySigner = load_string(PRIVATE_KEY)?.trim().parse()?;
        let contracts = ScenarioContracts::from_env()?;
        let refund_percent = load_percent(PROTOCOL_REFUND_PERCENT)?;

        let (relay_url, stream_url) =
            match (load_url_opt(MEV_SHARE_RELAY_URL), load_url_opt(MEV_SHARE_STREAM_URL)) {
                (Some(relay), Some(stream)) => (relay, stream),
                (relay, stream) => {
                    let endpoints = KnownChains::try_from(chain_id)?.endpoints();
                    (
                        relay.unwrap_or(Cow::Borrowed(endpoints.relay())),
                        stream.unwrap_or(Cow::Borrowed(endpoints.stream())),
                    )
                }
            };

        Ok(Self {
            chain_id,
            node_url,
            relay_url,
            stream_url,
            signer: signer.with_chain_id(Some(chain_id)),
            contracts,
            refund_percent,
        })
    }

    /// Get the chain id.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the node URL.
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Get the relay JSON-RPC URL.
    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }

    /// Get the relay event stream URL.
    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    /// Get the signer.
    pub const fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Get the scenario contract addresses.
    pub const fn contracts(&self) -> ScenarioContracts {
        self.contracts
    }

    /// Get the share of the winning bid refunded to the protocol.
    pub const fn refund_percent(&self) -> u8 {
        self.refund_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_is_reported_by_name() {
        let err = load_string("OVAL_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(matches!(&err, ConfigError::Var(key) if key == "OVAL_TEST_DEFINITELY_UNSET"));
        assert_eq!(
            err.to_string(),
            "missing or non-unicode environment variable: OVAL_TEST_DEFINITELY_UNSET"
        );
    }

    #[test]
    fn from_env_falls_back_to_known_endpoints() {
        let vars = [
            (CHAIN_ID, "11155111"),
            ("NODE_URL_11155111", "http://localhost:8545"),
            (PRIVATE_KEY, "0x0101010101010101010101010101010101010101010101010101010101010101"),
            (CHAINLINK_OVAL_IMMUTABLE_ADDRESS, "0x0000000000000000000000000000000000000001"),
            (
                OVAL_LIQUIDATION_DEMO_PRICE_FEED_ADDRESS,
                "0x0000000000000000000000000000000000000002",
            ),
            (OVAL_LIQUIDATION_DEMO_ADDRESS, "0x0000000000000000000000000000000000000003"),
            (PAY_BUILDER_ADDRESS, "0x0000000000000000000000000000000000000004"),
            (PROTOCOL_REFUND_PERCENT, "90"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let config = OvalConfig::from_env().unwrap();
        assert_eq!(config.chain_id(), 11155111);
        assert_eq!(config.node_url(), "http://localhost:8545");
        assert_eq!(config.relay_url(), oval_constants::sepolia::RELAY_URL);
        assert_eq!(config.stream_url(), oval_constants::sepolia::STREAM_URL);
        assert_eq!(config.refund_percent(), 90);
        assert_eq!(config.contracts().pay_builder, Address::with_last_byte(4));
        assert_eq!(config.signer().chain_id(), Some(11155111));

        std::env::set_var(PROTOCOL_REFUND_PERCENT, "101");
        assert!(matches!(
            OvalConfig::from_env(),
            Err(ConfigError::Percent { key: PROTOCOL_REFUND_PERCENT, value: 101 })
        ));
    }

    #[test]
    fn scenario_labels() {
        let contracts = ScenarioContracts::new(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
            Address::repeat_byte(4),
        );
        assert_eq!(contracts.label(Some(Address::repeat_byte(1))), "Price unlock");
        assert_eq!(contracts.label(Some(Address::repeat_byte(2))), "Price feed update");
        assert_eq!(contracts.label(Some(Address::repeat_byte(3))), "Liquidate");
        assert_eq!(contracts.label(Some(Address::repeat_byte(4))), "Pay builder");
        assert_eq!(contracts.label(Some(Address::repeat_byte(5))), "Unknown");
        assert_eq!(contracts.label(None), "Unknown");
    }
}

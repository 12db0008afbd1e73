use crate::config::ScenarioContracts;
use alloy::{
    primitives::Address,
    signers::{k256::ecdsa::SigningKey, local::PrivateKeySigner},
};
use std::sync::LazyLock;

pub use oval_constants::test_utils::TEST_CHAIN_ID;

/// Test signers used in tests.
pub static TEST_SIGNERS: LazyLock<[PrivateKeySigner; 10]> = LazyLock::new(|| {
    core::array::from_fn(|i| {
        PrivateKeySigner::from(SigningKey::from_slice(&[i as u8 + 1; 32]).unwrap())
    })
});

/// Test users used in tests. Addresses corresponding to [`TEST_SIGNERS`].
pub static TEST_USERS: LazyLock<[Address; 10]> =
    LazyLock::new(|| TEST_SIGNERS.each_ref().map(|s| s.address()));

/// Test address for the Oval oracle.
pub const TEST_OVAL_ADDRESS: Address = Address::repeat_byte(0x82);

/// Test address for the demo price feed.
pub const TEST_PRICE_FEED_ADDRESS: Address = Address::repeat_byte(0x83);

/// Test address for the demo liquidation market.
pub const TEST_LIQUIDATION_DEMO_ADDRESS: Address = Address::repeat_byte(0x84);

/// Test address for the builder payment contract.
pub const TEST_PAY_BUILDER_ADDRESS: Address = Address::repeat_byte(0x85);

/// Test address receiving protocol refunds.
pub const TEST_REFUND_ADDRESS: Address = Address::repeat_byte(0x86);

/// Scenario contracts for unit tests.
pub const TEST_CONTRACTS: ScenarioContracts = ScenarioContracts::new(
    TEST_OVAL_ADDRESS,
    TEST_PRICE_FEED_ADDRESS,
    TEST_LIQUIDATION_DEMO_ADDRESS,
    TEST_PAY_BUILDER_ADDRESS,
);

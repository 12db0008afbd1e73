#![allow(clippy::too_many_arguments)]
#![allow(missing_docs)]

mod oval {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[sol(rpc)]
        interface ChainlinkOvalImmutable {
            function unlockLatestValue() external;
            function latestAnswer() external view returns (int256);
            function latestTimestamp() external view returns (uint256);
        }
    );

    impl Copy for ChainlinkOvalImmutable::unlockLatestValueCall {}
}
pub use oval::ChainlinkOvalImmutable;

mod price_feed {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[sol(rpc)]
        interface OvalLiquidationDemoPriceFeed {
            function setValues(
                int256 answer,
                uint80 roundId,
                uint256 startedAt,
                uint256 updatedAt,
                uint80 answeredInRound
            ) external;
        }
    );

    impl Copy for OvalLiquidationDemoPriceFeed::setValuesCall {}
}
pub use price_feed::OvalLiquidationDemoPriceFeed;

mod liquidation {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[sol(rpc)]
        interface OvalLiquidationDemo {
            function updateCollateralisedPosition() external payable;
            function liquidate(address user) external;
            function ethBalances(address user) external view returns (uint256);
        }
    );

    impl Copy for OvalLiquidationDemo::liquidateCall {}
    impl Copy for OvalLiquidationDemo::updateCollateralisedPositionCall {}
}
pub use liquidation::OvalLiquidationDemo;

mod pay_builder {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[sol(rpc)]
        interface PayBuilder {
            function payBuilder() external payable;
        }
    );

    impl Copy for PayBuilder::payBuilderCall {}
}
pub use pay_builder::PayBuilder;

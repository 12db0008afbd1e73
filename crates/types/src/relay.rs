//! Readings of relay answers shared by relay clients and the searcher.
//!
//! The answers themselves are alloy's `mev_simBundle` and `mev_sendBundle`
//! response types.

use alloy::{
    primitives::{keccak256, B256},
    rpc::types::mev::{SendBundleResponse, SimBundleResponse},
};

/// Reason given for a failed simulation that carries no error text.
pub const UNSPECIFIED_SIM_FAILURE: &str = "simulation reported failure";

/// The reason the relay rejected a simulated bundle, if it did.
///
/// Error text wins over the success flag.
pub fn sim_rejection(report: &SimBundleResponse) -> Option<&str> {
    match (&report.error, report.success) {
        (Some(error), _) => Some(error.as_str()),
        (None, false) => Some(UNSPECIFIED_SIM_FAILURE),
        (None, true) => None,
    }
}

/// The hash under which a submitted bundle appears on the event stream.
///
/// The stream reports the keccak of the bundle hash, not the bundle hash
/// itself.
pub fn bundle_event_hash(receipt: &SendBundleResponse) -> B256 {
    keccak256(receipt.bundle_hash)
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::U256;
    use serde_json::json;

    fn report(value: serde_json::Value) -> SimBundleResponse {
        serde_json::from_value(value).unwrap()
    }

    const NUMBERS: [(&str, &str); 5] = [
        ("stateBlock", "0x10"),
        ("mevGasPrice", "0x1"),
        ("profit", "0x64"),
        ("refundableValue", "0x5a"),
        ("gasUsed", "0x5208"),
    ];

    fn with_numbers(mut value: serde_json::Value) -> serde_json::Value {
        for (key, number) in NUMBERS {
            value[key] = json!(number);
        }
        value
    }

    #[test]
    fn rejection() {
        assert_eq!(sim_rejection(&report(with_numbers(json!({ "success": true })))), None);

        let failed = report(with_numbers(json!({ "success": false, "error": "reverted" })));
        assert_eq!(sim_rejection(&failed), Some("reverted"));

        let silent = report(with_numbers(json!({ "success": false })));
        assert_eq!(sim_rejection(&silent), Some(UNSPECIFIED_SIM_FAILURE));
    }

    #[test]
    fn deser_sim_response() {
        let report = report(with_numbers(json!({ "success": true, "logs": [] })));
        assert!(report.success);
        assert_eq!(report.profit, U256::from(100));
        assert_eq!(report.gas_used, 21_000);
    }

    #[test]
    fn identity_is_hash_of_hash() {
        let receipt: SendBundleResponse = serde_json::from_str(
            r#"{"bundleHash":"0x1111111111111111111111111111111111111111111111111111111111111111"}"#,
        )
        .unwrap();
        assert_eq!(bundle_event_hash(&receipt), keccak256(receipt.bundle_hash));
        assert_ne!(bundle_event_hash(&receipt), receipt.bundle_hash);
    }
}

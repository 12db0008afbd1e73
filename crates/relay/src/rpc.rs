use crate::{RelayError, Result};
use alloy::rpc::json_rpc::{Id, Request, Response, ResponsePayload};
use std::borrow::Cow;

/// JSON-RPC method simulating a bundle.
pub const SIM_BUNDLE: &str = "mev_simBundle";

/// JSON-RPC method submitting a bundle.
pub const SEND_BUNDLE: &str = "mev_sendBundle";

/// Build a request with a numeric id.
pub fn request<P>(id: u64, method: &'static str, params: P) -> Request<P> {
    Request::new(Cow::Borrowed(method), Id::Number(id), params)
}

/// Turn a response into a result.
pub fn into_result<T>(response: Response<T>) -> Result<T> {
    match response.payload {
        ResponsePayload::Success(result) => Ok(result),
        ResponsePayload::Failure(error) => {
            Err(RelayError::Rpc { code: error.code, message: error.message.into_owned() })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::rpc::types::mev::SendBundleResponse;
    use serde_json::json;

    #[test]
    fn request_shape() {
        let req = request(7, SIM_BUNDLE, (json!({"version": "v0.1"}), json!({})));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "mev_simBundle",
                "params": [{"version": "v0.1"}, {}],
            })
        );
    }

    #[test]
    fn response_result() {
        let resp: Response<SendBundleResponse> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"result":{"bundleHash":"0x1111111111111111111111111111111111111111111111111111111111111111"}}"#,
        )
        .unwrap();
        assert!(into_result(resp).is_ok());
    }

    #[test]
    fn response_error() {
        let resp: Response<SendBundleResponse> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"unable to decode txs"}}"#,
        )
        .unwrap();
        assert!(matches!(
            into_result(resp),
            Err(RelayError::Rpc { code: -32000, ref message }) if message == "unable to decode txs"
        ));

        let empty = r#"{"jsonrpc":"2.0","id":1}"#;
        assert!(serde_json::from_str::<Response<SendBundleResponse>>(empty).is_err());
    }
}

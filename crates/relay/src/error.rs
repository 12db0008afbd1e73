/// Result type for [`MevShareClient`] operations.
///
/// [`MevShareClient`]: crate::MevShareClient
pub type Result<T> = std::result::Result<T, RelayError>;

/// Errors returned by the [`MevShareClient`].
///
/// [`MevShareClient`]: crate::MevShareClient
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum RelayError {
    /// The relay answered with a JSON-RPC error.
    #[error("relay returned error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
    },

    /// The relay rejected the request signature.
    #[error("relay rejected request authentication")]
    Unauthorized,

    /// Signing the request body failed.
    #[error("failed to sign relay request: {0}")]
    Signing(#[from] alloy::signers::Error),

    /// An error occurred while parsing the URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// A payload could not be serialized, or a response parsed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An error occurred while contacting the relay.
    #[error("error contacting relay: {0}")]
    Reqwest(reqwest::Error),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(reqwest::StatusCode::UNAUTHORIZED) | Some(reqwest::StatusCode::FORBIDDEN) => {
                RelayError::Unauthorized
            }
            _ => RelayError::Reqwest(err),
        }
    }
}

pub mod chain;
pub mod events;
pub mod relay;

pub use oval_types::test_utils as test_constants;
pub use oval_types::test_utils::*;

use thiserror::Error;

/// Error returned by the mocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mock error: {0}")]
pub struct MockError(pub String);

impl MockError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Install a test log subscriber honouring `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// MEV-Share endpoints for a network.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RelayEndpoints {
    /// JSON-RPC endpoint accepting `mev_simBundle` and `mev_sendBundle`.
    relay: &'static str,
    /// Server-sent event stream of pending transactions and bundles.
    stream: &'static str,
}

impl RelayEndpoints {
    /// Create a new set of endpoints.
    pub const fn new(relay: &'static str, stream: &'static str) -> Self {
        Self { relay, stream }
    }

    /// Get the relay URL.
    pub const fn relay(&self) -> &'static str {
        self.relay
    }

    /// Get the event stream URL.
    pub const fn stream(&self) -> &'static str {
        self.stream
    }
}

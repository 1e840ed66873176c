// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::providers::RootProvider;

use crate::core::config::{ConfigError, NetworkConfig};

/// Opens an HTTP JSON-RPC client for `network`.
///
/// Nothing is sent yet, so an unreachable node only shows up on the first request.
pub fn connect(network: &NetworkConfig) -> Result<RootProvider, ConfigError> {
    let endpoint = network.endpoint()?;
    // Paths and credentials often carry API keys
    debug!(@grey, "connecting to {} for network {}", endpoint.origin().ascii_serialization(), network.name());
    Ok(RootProvider::new_http(endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_networks_without_endpoint() {
        let network = NetworkConfig::new("local", "", vec![]);
        assert!(connect(&network).is_err());
    }

    #[test]
    fn connects_lazily() {
        let network = NetworkConfig::new("local", "http://127.0.0.1:1", vec![]);
        assert!(connect(&network).is_ok());
    }
}

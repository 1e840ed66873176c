// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use eyre::{Result, WrapErr};
use reqwest::{header::HeaderValue, Method, Response};
use testcontainers::{
    core::{wait::HttpWaitStrategy, IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use crate::core::config::{AccountSecret, NetworkConfig};

/// Key of the first account funded by the dev node.
pub const DEVNET_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

const FOUNDRY_IMAGE_NAME: &str = "ghcr.io/foundry-rs/foundry";
const FOUNDRY_IMAGE_TAG: &str = "v1.0.0";
const ANVIL_PORT: u16 = 8545;

/// Manage a devnet node for deploying contracts.
pub struct Node {
    _container: ContainerAsync<GenericImage>,
    rpc: String,
}

impl Node {
    /// Starts a new Anvil node in the background, mining every transaction as it arrives.
    /// This node will be shutdown when this struct is dropped.
    pub async fn new() -> Result<Self> {
        let wait_strategy = HttpWaitStrategy::new("/")
            .with_port(ANVIL_PORT.into())
            .with_method(Method::POST)
            .with_header("Content-Type", HeaderValue::from_static("application/json"))
            .with_body(r#"{"jsonrpc":"2.0","method":"net_version","params":[],"id":1}"#)
            .with_response_matcher_async(anvil_response_matcher);
        // The image's entrypoint runs its command through a shell
        let container = GenericImage::new(FOUNDRY_IMAGE_NAME, FOUNDRY_IMAGE_TAG)
            .with_exposed_port(ANVIL_PORT.tcp())
            .with_wait_for(WaitFor::Http(wait_strategy))
            .with_cmd(vec![format!("anvil --host 0.0.0.0 --port {ANVIL_PORT}")])
            .start()
            .await
            .wrap_err("failed to start Anvil container")?;
        let port = container
            .get_host_port_ipv4(ANVIL_PORT)
            .await
            .wrap_err("failed to get Anvil RPC port")?;
        Ok(Node {
            _container: container,
            rpc: format!("http://localhost:{port}"),
        })
    }

    /// Get the node RPC.
    pub fn rpc(&self) -> &str {
        &self.rpc
    }

    /// Network pointing at this node, signing with its first funded account.
    pub fn network(&self) -> NetworkConfig {
        NetworkConfig::new(
            "devnet",
            self.rpc(),
            vec![AccountSecret::new(DEVNET_PRIVATE_KEY)],
        )
    }
}

async fn anvil_response_matcher(response: Response) -> bool {
    let Ok(text) = response.text().await else {
        return false;
    };
    text.contains("result")
}

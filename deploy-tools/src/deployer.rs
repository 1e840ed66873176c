// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{
    io::{self, Write},
    path::PathBuf,
};

use typed_builder::TypedBuilder;

use crate::{
    core::{
        artifact::ArtifactStore,
        config::NetworkConfig,
        deployment::{Deployment, DeploymentConfig, DeploymentError, DeploymentResult},
        network,
    },
    Result,
};

/// Defines a single contract deployment.
/// After setting the parameters, call [`Deployer::deploy`] to perform the deployment.
#[derive(TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct Deployer {
    #[builder(!default)]
    network: NetworkConfig,

    /// Name of the contract to deploy, optionally qualified with its source file
    /// (`contracts/Token.sol:Token`).
    #[builder(!default)]
    contract: String,

    #[builder(default = PathBuf::from(crate::core::config::DEFAULT_ARTIFACTS_DIR))]
    artifacts_dir: PathBuf,

    config: DeploymentConfig,
}

impl Deployer {
    /// Deploys the contract, printing progress to stdout.
    pub async fn deploy(&self) -> Result<DeploymentResult> {
        self.deploy_to(&mut io::stdout()).await
    }

    /// Deploys the contract, printing progress to `out`.
    ///
    /// The deployer account is printed before anything is sent; the contract address only once
    /// the deployment is confirmed.
    pub async fn deploy_to(&self, out: &mut impl Write) -> Result<DeploymentResult> {
        let mut deployment = Deployment::new();
        let signer = deployment.select_signer(&self.network)?;
        writeln!(out, "Deploying contracts with the account: {}", signer.address())?;

        let artifact = ArtifactStore::new(&self.artifacts_dir)
            .resolve(&self.contract)
            .map_err(DeploymentError::from)?;
        let provider = network::connect(&self.network)?;

        let result = deployment
            .deploy(&artifact, &signer, &self.config, &provider)
            .await?;
        report(&result, out)?;
        Ok(result)
    }
}

/// Prints the address of a confirmed deployment.
pub fn report(result: &DeploymentResult, out: &mut impl Write) -> io::Result<()> {
    info!(@grey, "deployed in tx {} (block {:?}, {} gas)",
        result.tx_hash,
        result.block_number,
        result.gas_used
    );
    writeln!(out, "Contract deployed at: {}", result.address)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path, time::Duration};

    use alloy::primitives::U256;

    use super::*;
    use crate::{
        core::{config::AccountSecret, deployment::ConfirmationConfig},
        utils::testing::{self, RpcStub, DEV_ADDRESS, FIRST_CONTRACT, TX_HASH},
        Error,
    };

    fn artifacts(dir: &Path) {
        let path = dir.join("contracts/Carpooling.sol/Carpooling.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, testing::artifact_json("Carpooling")).unwrap();
    }

    fn fast() -> DeploymentConfig {
        DeploymentConfig {
            confirmation: ConfirmationConfig {
                poll_interval: Duration::from_millis(10),
                timeout: Some(Duration::from_secs(5)),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn deployer(network: NetworkConfig, dir: &Path) -> Deployer {
        Deployer::builder()
            .network(network)
            .contract("Carpooling")
            .artifacts_dir(dir)
            .config(fast())
            .build()
    }

    #[tokio::test]
    async fn reports_deployed_address() {
        let stub = RpcStub::start().await;
        stub.funded_chain().await;
        let dir = tempfile::tempdir().unwrap();
        artifacts(dir.path());

        let mut out = Vec::new();
        let result = deployer(testing::network(stub.url()), dir.path())
            .deploy_to(&mut out)
            .await
            .unwrap();

        assert_eq!(result.deployer, DEV_ADDRESS);
        assert_eq!(result.address, FIRST_CONTRACT);
        assert_eq!(result.tx_hash, TX_HASH);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with(&format!(
            "Deploying contracts with the account: {DEV_ADDRESS}\n"
        )));
        assert!(out.contains("Contract deployed at: "));
        assert!(out.contains(&FIRST_CONTRACT.to_string()));
        assert_eq!(stub.calls("eth_sendRawTransaction").await, 1);
    }

    #[tokio::test]
    async fn no_accounts_means_nothing_is_sent() {
        let stub = RpcStub::start().await;
        stub.funded_chain().await;
        let dir = tempfile::tempdir().unwrap();
        artifacts(dir.path());
        let network = NetworkConfig::new("local", stub.url(), vec![]);

        let mut out = Vec::new();
        let err = deployer(network, dir.path())
            .deploy_to(&mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_deployment(),
            Some(DeploymentError::NoSignerConfigured { network }) if network == "local"
        ));
        assert!(out.is_empty());
        assert_eq!(stub.calls("eth_chainId").await, 0);
    }

    #[tokio::test]
    async fn unfunded_account_is_not_reported() {
        let stub = RpcStub::start().await;
        stub.chain(U256::ZERO).await;
        let dir = tempfile::tempdir().unwrap();
        artifacts(dir.path());

        let mut out = Vec::new();
        let err = deployer(testing::network(stub.url()), dir.path())
            .deploy_to(&mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_deployment(),
            Some(DeploymentError::InsufficientFunds { address, .. }) if *address == DEV_ADDRESS
        ));
        assert_eq!(stub.calls("eth_sendRawTransaction").await, 0);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Deploying contracts with the account"));
        assert!(!out.contains("Contract deployed at"));
    }

    #[tokio::test]
    async fn unreachable_node_is_network_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        artifacts(dir.path());

        let mut out = Vec::new();
        let err = deployer(testing::network("http://127.0.0.1:1"), dir.path())
            .deploy_to(&mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_deployment(),
            Some(DeploymentError::NetworkUnavailable(_))
        ));
        assert!(!String::from_utf8(out).unwrap().contains("Contract deployed at"));
    }

    #[tokio::test]
    async fn missing_artifact_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let network = NetworkConfig::new(
            "local",
            "http://127.0.0.1:1",
            vec![AccountSecret::new(testing::DEV_KEY)],
        );

        let err = deployer(network, dir.path())
            .deploy_to(&mut io::sink())
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_deployment(),
            Some(DeploymentError::InvalidArtifact(_))
        ));
    }

    #[tokio::test]
    async fn missing_endpoint_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        artifacts(dir.path());

        let err = deployer(testing::network(""), dir.path())
            .deploy_to(&mut io::sink())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

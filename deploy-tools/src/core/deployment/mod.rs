// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.
//!
//! A [`Deployment`] selects the signer of a network, broadcasts one contract-creation
//! transaction and waits for it to be confirmed. Nothing is retried: a failure at any point
//! ends the run.

use std::time::Duration;

use alloy::{
    primitives::{Address, TxHash},
    providers::Provider,
    transports::{RpcError, TransportErrorKind},
};

use crate::{
    core::{
        artifact::{ArtifactError, CompiledArtifact},
        config::NetworkConfig,
        signer::{self, Signer, SignerError},
    },
    utils::{
        color::{Color, DebugColor},
        format_fee, format_gas,
    },
};

pub use confirmation::{await_confirmation, ConfirmationConfig};
pub use factory::ContractFactory;
pub use request::{DeploymentRequest, PreparedDeployment};
pub use stage::DeploymentStage;

pub mod confirmation;
pub mod factory;
pub mod request;
pub mod stage;

#[derive(Clone, Debug, Default)]
pub struct DeploymentConfig {
    /// Fixed max fee per gas; the node's EIP-1559 estimate is used when unset.
    pub max_fee_per_gas_wei: Option<u128>,
    pub max_priority_fee_per_gas_wei: Option<u128>,
    pub confirmation: ConfirmationConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("no signer configured for network {network:?}")]
    NoSignerConfigured { network: String },
    #[error("invalid signer for network {network:?}: {source}")]
    InvalidSigner {
        network: String,
        source: SignerError,
    },
    #[error("{0}")]
    InvalidArtifact(#[from] ArtifactError),
    #[error("network unavailable: {0}")]
    NetworkUnavailable(RpcError<TransportErrorKind>),
    #[error("not enough funds in account {} to deploy: {detail}", .address.red())]
    InsufficientFunds { address: Address, detail: String },
    #[error("deploy tx rejected: {reason}")]
    TransactionRejected {
        tx_hash: Option<TxHash>,
        reason: String,
    },
    #[error("deploy tx {} not confirmed within {timeout:?}", .tx_hash.debug_red())]
    ConfirmationTimeout { tx_hash: TxHash, timeout: Duration },
    #[error("invalid deployment config: {0}")]
    InvalidConfig(String),
    #[error("unexpected failure: {0}")]
    UnexpectedFailure(String),
}

/// Classifies an error from a state-changing request (gas estimation or broadcast).
pub(crate) fn rpc_failure(err: RpcError<TransportErrorKind>, sender: Address) -> DeploymentError {
    let RpcError::ErrorResp(payload) = &err else {
        return read_failure(err);
    };
    let message = payload.message.to_string();
    if message.to_lowercase().contains("insufficient funds") {
        DeploymentError::InsufficientFunds {
            address: sender,
            detail: message,
        }
    } else {
        DeploymentError::TransactionRejected {
            tx_hash: None,
            reason: message,
        }
    }
}

/// Classifies an error from a read-only request.
pub(crate) fn read_failure(err: RpcError<TransportErrorKind>) -> DeploymentError {
    match err {
        RpcError::Transport(_) => DeploymentError::NetworkUnavailable(err),
        err => DeploymentError::UnexpectedFailure(err.to_string()),
    }
}

/// Outcome of a confirmed deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    pub deployer: Address,
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// One deployment run, tracked through its [`DeploymentStage`]s.
#[derive(Debug, Default)]
pub struct Deployment {
    stage: DeploymentStage,
}

impl Deployment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> DeploymentStage {
        self.stage
    }

    /// Picks the first account configured on `network`.
    pub fn select_signer(&mut self, network: &NetworkConfig) -> Result<Signer, DeploymentError> {
        self.advance(DeploymentStage::SelectingSigner)?;
        let selected = signer::first_account(network)
            .map_err(|source| DeploymentError::InvalidSigner {
                network: network.name().to_owned(),
                source,
            })
            .and_then(|signer| {
                signer.ok_or_else(|| DeploymentError::NoSignerConfigured {
                    network: network.name().to_owned(),
                })
            });
        self.settle(selected, None)
    }

    /// Deploys `artifact` from `signer`, returning once the creation is confirmed.
    pub async fn deploy(
        &mut self,
        artifact: &CompiledArtifact,
        signer: &Signer,
        config: &DeploymentConfig,
        provider: &impl Provider,
    ) -> Result<DeploymentResult, DeploymentError> {
        self.advance(DeploymentStage::Deploying)?;
        let result = self.execute(artifact, signer, config, provider).await;
        self.settle(result, Some(DeploymentStage::Deployed))
    }

    async fn execute(
        &mut self,
        artifact: &CompiledArtifact,
        signer: &Signer,
        config: &DeploymentConfig,
        provider: &impl Provider,
    ) -> Result<DeploymentResult, DeploymentError> {
        config.confirmation.validate()?;
        let chain_id = provider.get_chain_id().await.map_err(read_failure)?;
        debug!(@grey, "connected to chain {chain_id}");
        let signer = signer.clone().with_chain_id(chain_id);
        let factory = ContractFactory::new(artifact, &signer);
        let deployer = factory.deployer();

        let nonce = provider
            .get_transaction_count(deployer)
            .await
            .map_err(read_failure)?;
        let prepared = factory
            .deploy_request(config)
            .prepare(nonce, chain_id, provider)
            .await?;

        let balance = provider.get_balance(deployer).await.map_err(read_failure)?;
        let cost = prepared.max_cost();
        if balance < cost {
            return Err(DeploymentError::InsufficientFunds {
                address: deployer,
                detail: format!("balance {balance} wei < max cost {cost} wei"),
            });
        }
        info!(@grey,
            "deploying {} with {} at up to {}",
            artifact.name().lavender(),
            format_gas(prepared.gas().into()),
            format_fee(cost)
        );

        let tx_hash = prepared.send(&signer, provider).await?;
        info!(@grey, "deployment tx hash: {}", tx_hash.debug_lavender());
        self.advance(DeploymentStage::AwaitingConfirmation)?;

        let receipt = await_confirmation(tx_hash, &config.confirmation, provider).await?;
        if !receipt.status() {
            return Err(DeploymentError::TransactionRejected {
                tx_hash: Some(tx_hash),
                reason: format!("deploy tx {} reverted", tx_hash.debug_red()),
            });
        }
        let address = receipt.contract_address.ok_or_else(|| {
            DeploymentError::UnexpectedFailure(format!(
                "receipt of {tx_hash} has no contract address"
            ))
        })?;
        if address != factory.predicted_address(nonce) {
            warn!(@yellow, "contract address {address} differs from the expected CREATE address");
        }
        debug!(@grey, "gas used: {}", format_gas(receipt.gas_used.into()));

        Ok(DeploymentResult {
            deployer,
            address,
            tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }

    fn advance(&mut self, next: DeploymentStage) -> Result<(), DeploymentError> {
        if !self.stage.can_advance_to(next) {
            return Err(DeploymentError::UnexpectedFailure(format!(
                "deployment cannot move from {} to {next}",
                self.stage
            )));
        }
        debug!(@grey, "deployment stage: {next}");
        self.stage = next;
        Ok(())
    }

    /// Records the outcome of a step, failing the run on error.
    fn settle<T>(
        &mut self,
        result: Result<T, DeploymentError>,
        on_success: Option<DeploymentStage>,
    ) -> Result<T, DeploymentError> {
        match &result {
            Ok(_) => {
                if let Some(next) = on_success {
                    self.advance(next)?;
                }
            }
            Err(err) => {
                debug!(@grey, "deployment failed while {}: {err}", self.stage);
                self.stage = DeploymentStage::Failed;
            }
        }
        result
    }
}

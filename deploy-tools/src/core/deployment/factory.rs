// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;

use super::{request::DeploymentRequest, DeploymentConfig};
use crate::core::{artifact::CompiledArtifact, signer::Signer};

/// A compiled contract bound to the signer that will deploy it.
#[derive(Clone, Copy, Debug)]
pub struct ContractFactory<'a> {
    artifact: &'a CompiledArtifact,
    signer: &'a Signer,
}

impl<'a> ContractFactory<'a> {
    pub fn new(artifact: &'a CompiledArtifact, signer: &'a Signer) -> Self {
        Self { artifact, signer }
    }

    pub fn deployer(&self) -> Address {
        self.signer.address()
    }

    /// Contract-creation request carrying the artifact's bytecode.
    pub fn deploy_request(&self, config: &DeploymentConfig) -> DeploymentRequest {
        DeploymentRequest::new(
            self.deployer(),
            self.artifact.bytecode().clone(),
            config.max_fee_per_gas_wei,
            config.max_priority_fee_per_gas_wei,
        )
    }

    /// Address the contract will have when created with the given deployer nonce.
    pub fn predicted_address(&self, nonce: u64) -> Address {
        self.deployer().create(nonce)
    }
}

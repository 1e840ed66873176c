// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Build, price, sign and broadcast a contract-creation transaction.

use alloy::{
    eips::eip2718::Encodable2718,
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
};

use super::{read_failure, rpc_failure, DeploymentError};
use crate::{core::signer::Signer, utils::color::DebugColor};

/// Deployment transaction request for a compiled contract
#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    max_fee_per_gas_wei: Option<u128>,
    max_priority_fee_per_gas_wei: Option<u128>,
}

impl DeploymentRequest {
    pub fn new(
        sender: Address,
        code: Bytes,
        max_fee_per_gas_wei: Option<u128>,
        max_priority_fee_per_gas_wei: Option<u128>,
    ) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(code),
            max_fee_per_gas_wei,
            max_priority_fee_per_gas_wei,
        }
    }

    fn sender(&self) -> Address {
        self.tx.from.unwrap_or_default()
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        provider
            .estimate_gas(self.tx.clone())
            .await
            .map_err(|err| rpc_failure(err, self.sender()))
    }

    /// Max fee and priority fee per gas, in wei.
    ///
    /// Fees that are not configured come from the node's EIP-1559 estimate: a tip from recent
    /// blocks and a max fee of twice the base fee plus that tip.
    async fn fees_per_gas(&self, provider: &impl Provider) -> Result<(u128, u128), DeploymentError> {
        let (max_fee, tip) = match (self.max_fee_per_gas_wei, self.max_priority_fee_per_gas_wei) {
            (Some(max_fee), Some(tip)) => (max_fee, tip),
            (max_fee, tip) => {
                let estimate = provider
                    .estimate_eip1559_fees()
                    .await
                    .map_err(read_failure)?;
                (
                    max_fee.unwrap_or(estimate.max_fee_per_gas),
                    tip.unwrap_or(estimate.max_priority_fee_per_gas),
                )
            }
        };
        Ok((max_fee, tip.min(max_fee)))
    }

    /// Fills in nonce, chain, gas and fees, leaving a transaction ready to sign.
    pub async fn prepare(
        self,
        nonce: u64,
        chain_id: u64,
        provider: &impl Provider,
    ) -> Result<PreparedDeployment, DeploymentError> {
        let gas = self.estimate_gas(provider).await?;
        let (max_fee_per_gas, max_priority_fee_per_gas) = self.fees_per_gas(provider).await?;

        let tx = self
            .tx
            .with_nonce(nonce)
            .with_chain_id(chain_id)
            .with_gas_limit(gas)
            .with_max_fee_per_gas(max_fee_per_gas)
            .with_max_priority_fee_per_gas(max_priority_fee_per_gas);

        Ok(PreparedDeployment {
            tx,
            gas,
            max_fee_per_gas,
        })
    }
}

/// A fully specified deployment transaction, not yet signed.
#[derive(Debug)]
pub struct PreparedDeployment {
    tx: TransactionRequest,
    gas: u64,
    max_fee_per_gas: u128,
}

impl PreparedDeployment {
    pub fn gas(&self) -> u64 {
        self.gas
    }

    /// Most the sender can be charged for this transaction.
    pub fn max_cost(&self) -> U256 {
        U256::from(self.gas) * U256::from(self.max_fee_per_gas)
    }

    /// Signs the transaction locally and broadcasts it once.
    pub async fn send(
        self,
        signer: &Signer,
        provider: &impl Provider,
    ) -> Result<TxHash, DeploymentError> {
        let sender = signer.address();
        let envelope = self
            .tx
            .build(&signer.wallet())
            .await
            .map_err(|err| DeploymentError::UnexpectedFailure(format!("failed to sign: {err}")))?;
        let raw = envelope.encoded_2718();

        let pending = provider
            .send_raw_transaction(&raw)
            .await
            .map_err(|err| rpc_failure(err, sender))?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());
        Ok(tx_hash)
    }
}

// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Waiting for a broadcast transaction to be mined.
//!
//! The wait is an ordinary future: dropping it cancels the wait without affecting the
//! transaction, which may still be mined later.

use std::time::Duration;

use alloy::{primitives::TxHash, providers::Provider, rpc::types::TransactionReceipt};
use tokio::time::{self, MissedTickBehavior};

use super::{read_failure, DeploymentError};
use crate::utils::color::DebugColor;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationConfig {
    /// Blocks that must include or follow the transaction's block, at least 1.
    pub confirmations: u64,
    /// Upper bound on the whole wait. Unbounded when `None`.
    pub timeout: Option<Duration>,
    pub poll_interval: Duration,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ConfirmationConfig {
    /// Rejects settings the wait cannot run with.
    pub fn validate(&self) -> Result<(), DeploymentError> {
        if self.poll_interval.is_zero() {
            return Err(DeploymentError::InvalidConfig(
                "confirmation poll interval must be non-zero".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Waits until `tx_hash` is mined and has the configured number of confirmations.
pub async fn await_confirmation(
    tx_hash: TxHash,
    config: &ConfirmationConfig,
    provider: &impl Provider,
) -> Result<TransactionReceipt, DeploymentError> {
    config.validate()?;
    let wait = wait_for_receipt(tx_hash, config, provider);
    match config.timeout {
        Some(timeout) => time::timeout(timeout, wait)
            .await
            .map_err(|_| DeploymentError::ConfirmationTimeout { tx_hash, timeout })?,
        None => wait.await,
    }
}

async fn wait_for_receipt(
    tx_hash: TxHash,
    config: &ConfirmationConfig,
    provider: &impl Provider,
) -> Result<TransactionReceipt, DeploymentError> {
    let mut interval = time::interval(config.poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let receipt = loop {
        interval.tick().await;
        let receipt = provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(read_failure)?;
        match receipt {
            Some(receipt) => break receipt,
            None => debug!(@grey, "deploy tx {} not mined yet", tx_hash.debug_lavender()),
        }
    };

    if config.confirmations <= 1 {
        return Ok(receipt);
    }
    let Some(mined_in) = receipt.block_number else {
        return Err(DeploymentError::UnexpectedFailure(format!(
            "receipt of {tx_hash} has no block number"
        )));
    };
    let target = mined_in.saturating_add(config.confirmations - 1);
    loop {
        let head = provider
            .get_block_number()
            .await
            .map_err(read_failure)?;
        if head >= target {
            return Ok(receipt);
        }
        let confirmed = head.saturating_sub(mined_in) + 1;
        debug!(@grey, "deploy tx has {confirmed} of {} confirmations", config.confirmations);
        interval.tick().await;
    }
}

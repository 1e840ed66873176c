// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use deploy_tools::{
    core::{
        config::{NetworkConfig, ProjectConfig},
        deployment::{ConfirmationConfig, DeploymentConfig},
    },
    utils::convert_gwei_to_wei,
};
use eyre::eyre;

use crate::constants::DEFAULT_CONFIG;

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Project configuration file
    #[arg(long, env = "DEPLOY_CONFIG", default_value = DEFAULT_CONFIG)]
    config: PathBuf,
    /// Network to use instead of the configured default
    #[arg(long, env = "DEPLOY_NETWORK")]
    network: Option<String>,
}

impl ConfigArgs {
    pub fn load(&self) -> eyre::Result<ProjectConfig> {
        let config = ProjectConfig::load(&self.config)?;
        log::debug!("loaded project configuration from {}", self.config.display());
        Ok(config)
    }

    pub fn network(&self, project: &ProjectConfig) -> eyre::Result<NetworkConfig> {
        Ok(project.network(self.network.as_deref())?)
    }

    /// Directory containing the config file, against which relative paths are resolved.
    pub fn project_root(&self) -> &Path {
        match self.config.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct FeeArgs {
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
    /// Optional max priority fee per gas in gwei units.
    #[arg(long)]
    max_priority_fee_per_gas_gwei: Option<String>,
}

impl FeeArgs {
    pub fn get_max_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        gwei_to_wei(self.max_fee_per_gas_gwei.as_deref())
    }

    pub fn get_max_priority_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        gwei_to_wei(self.max_priority_fee_per_gas_gwei.as_deref())
    }
}

fn gwei_to_wei(fee: Option<&str>) -> eyre::Result<Option<u128>> {
    fee.map(|fee_str| convert_gwei_to_wei(fee_str).map_err(|err| eyre!(err)))
        .transpose()
}

#[derive(Debug, clap::Args)]
pub struct ConfirmationArgs {
    /// Number of blocks that must include or follow the deployment
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    confirmations: u64,
    /// Give up waiting for confirmation after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// How often to poll the node while waiting for confirmation
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval_ms: u64,
}

impl ConfirmationArgs {
    pub fn config(&self) -> ConfirmationConfig {
        ConfirmationConfig {
            confirmations: self.confirmations,
            timeout: self.timeout_secs.map(Duration::from_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

pub fn deployment_config(
    fees: &FeeArgs,
    confirmation: &ConfirmationArgs,
) -> eyre::Result<DeploymentConfig> {
    Ok(DeploymentConfig {
        max_fee_per_gas_wei: fees.get_max_fee_per_gas_wei()?,
        max_priority_fee_per_gas_wei: fees.get_max_priority_fee_per_gas_wei()?,
        confirmation: confirmation.config(),
    })
}

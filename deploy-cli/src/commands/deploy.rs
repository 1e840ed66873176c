// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{future, path::PathBuf};

use deploy_tools::{core::deployment::DeploymentError, Deployer};

use crate::{
    common_args::{deployment_config, ConfigArgs, ConfirmationArgs, FeeArgs},
    error::DeployCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contract to deploy, by name or as `path/File.sol:Name`.
    contract: String,
    /// Directory of compiled artifacts, overriding the one in the project configuration.
    #[arg(long)]
    artifacts: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    fees: FeeArgs,
    #[command(flatten)]
    confirmation: ConfirmationArgs,
}

pub async fn exec(args: Args) -> DeployCliResult {
    let project = args.config.load()?;
    let network = args.config.network(&project)?;
    let artifacts_dir = args
        .artifacts
        .unwrap_or_else(|| project.artifacts_dir(args.config.project_root()));
    log::debug!("deploying to network {}", network.name());

    let deployer = Deployer::builder()
        .network(network)
        .contract(args.contract)
        .artifacts_dir(artifacts_dir)
        .config(deployment_config(&args.fees, &args.confirmation)?)
        .build();

    tokio::select! {
        result = deployer.deploy() => {
            result?;
        }
        () = interrupted() => {
            // A broadcast transaction may still be mined; its hash has already been logged
            return Err(DeploymentError::UnexpectedFailure(
                "interrupted before the deployment was confirmed".to_owned(),
            )
            .into());
        }
    }
    Ok(())
}

/// Resolves on Ctrl-C, or never if the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        future::pending::<()>().await;
    }
}

// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::DeployCliResult;

mod config;
mod deploy;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the resolved configuration of a network, with secrets redacted
    Config(config::Args),
    /// Deploy a compiled contract
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
}

pub async fn exec(cmd: Command) -> DeployCliResult {
    match cmd {
        Command::Config(args) => config::exec(args),
        Command::Deploy(args) => deploy::exec(args).await,
    }
}

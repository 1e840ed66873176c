// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use deploy_tools::core::signer::Signer;

use crate::{common_args::ConfigArgs, error::DeployCliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    config: ConfigArgs,
}

pub fn exec(args: Args) -> DeployCliResult {
    let project = args.config.load()?;
    let network = args.config.network(&project)?;

    println!("network: {}", network.name());
    // Endpoint paths often embed API keys
    match network.endpoint() {
        Ok(url) if url.path() == "/" && url.query().is_none() => println!("url: {url}"),
        Ok(url) => println!("url: {}/<redacted>", url.origin().ascii_serialization()),
        Err(err) => println!("url: <{err}>"),
    }
    if network.accounts().is_empty() {
        println!("accounts: none");
    }
    for (index, account) in network.accounts().iter().enumerate() {
        match Signer::from_secret(account) {
            Ok(signer) => println!("account {index}: {}", signer.address()),
            Err(err) => println!("account {index}: <{err}>"),
        }
    }
    println!(
        "artifacts: {}",
        project.artifacts_dir(args.config.project_root()).display()
    );
    if let Some(solidity) = &project.solidity {
        println!("compiler: {solidity}");
    }
    Ok(())
}

// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deploying compiled EVM contracts.
//!
//! The [`Deployer`] drives a single deployment: it picks the signer of the active network,
//! resolves the compiled artifact, broadcasts the contract-creation transaction and waits for
//! it to be confirmed. The pieces it is made of live in [`core`] and can be used on their own.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod utils;

pub mod deployer;
#[cfg(feature = "integration-tests")]
pub mod devnet;
pub use deployer::*;

pub use error::{Error, Result};

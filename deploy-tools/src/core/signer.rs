// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Signer selection.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, B256},
    signers::{local::PrivateKeySigner, Signer as _},
};

use crate::core::config::{AccountSecret, NetworkConfig};
use crate::utils::decode0x;

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("private key is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("private key must be 32 bytes, got {0}")]
    Length(usize),
    #[error("private key is not a valid secp256k1 scalar")]
    Scalar,
}

/// An account able to authorize and pay for transactions on one network.
#[derive(Clone, Debug)]
pub struct Signer {
    inner: PrivateKeySigner,
}

impl Signer {
    /// Parses a hex-encoded private key, with or without `0x`.
    pub fn from_secret(secret: &AccountSecret) -> Result<Self, SignerError> {
        let bytes = decode0x(secret.expose())?;
        if bytes.len() != 32 {
            return Err(SignerError::Length(bytes.len()));
        }
        let key = B256::from_slice(&bytes);
        let inner = PrivateKeySigner::from_bytes(&key).map_err(|_| SignerError::Scalar)?;
        Ok(Self { inner })
    }

    pub fn address(&self) -> Address {
        self.inner.address()
    }

    /// Binds the signer to a chain so its signatures cannot be replayed elsewhere.
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        Self {
            inner: self.inner.with_chain_id(Some(chain_id)),
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.inner.chain_id()
    }

    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::new(self.inner.clone())
    }
}

/// Returns the signer for the first account configured on `network`.
///
/// Returns `Ok(None)` when the network has no accounts.
pub fn first_account(network: &NetworkConfig) -> Result<Option<Signer>, SignerError> {
    network
        .accounts()
        .first()
        .map(Signer::from_secret)
        .transpose()
}

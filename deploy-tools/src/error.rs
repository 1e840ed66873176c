// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::core::{config::ConfigError, deployment::DeploymentError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl Error {
    /// The deployment failure behind this error, if the run got past configuration.
    pub fn as_deployment(&self) -> Option<&DeploymentError> {
        match self {
            Self::Deployment(err) => Some(err),
            Self::Config(_) | Self::Report(_) => None,
        }
    }
}

// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;

/// Where a deployment run is.
///
/// Runs only move forward: `Start → SelectingSigner → Deploying → AwaitingConfirmation`, ending
/// in either `Deployed` or `Failed`. Any non-terminal stage may fail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeploymentStage {
    #[default]
    Start,
    SelectingSigner,
    Deploying,
    AwaitingConfirmation,
    Deployed,
    Failed,
}

impl DeploymentStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Deployed | Self::Failed)
    }

    /// Whether `next` directly follows this stage.
    pub fn can_advance_to(self, next: Self) -> bool {
        use DeploymentStage::*;
        match (self, next) {
            (Start, SelectingSigner)
            | (SelectingSigner, Deploying)
            | (Deploying, AwaitingConfirmation)
            | (AwaitingConfirmation, Deployed) => true,
            (current, Failed) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for DeploymentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::SelectingSigner => "selecting signer",
            Self::Deploying => "deploying",
            Self::AwaitingConfirmation => "awaiting confirmation",
            Self::Deployed => "deployed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

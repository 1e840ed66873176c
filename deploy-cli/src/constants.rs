// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Project configuration read when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "deploy.toml";

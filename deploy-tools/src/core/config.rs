// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Project configuration: networks, accounts, artifact paths and compiler settings.
//!
//! The configuration is a TOML file, typically `deploy.toml` at the project root:
//!
//! ```toml
//! default_network = "sepolia"
//!
//! [solidity]
//! version = "0.8.24"
//! optimizer = { enabled = true, runs = 200 }
//!
//! [paths]
//! artifacts = "./client/src"
//!
//! [networks.hardhat]
//!
//! [networks.sepolia]
//! url = "${SEPOLIA_URL}"
//! accounts = ["0x${PRIVATE_KEY}"]
//! ```
//!
//! `${VAR}` references are expanded from the process environment when a network is resolved.
//! Once resolved, a [`NetworkConfig`] never changes.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use alloy::transports::http::reqwest::Url;
use regex::{Captures, Regex};
use serde::Deserialize;

/// Default location of compiled artifacts, relative to the project root.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

static ENV_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env reference pattern")
});

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no network selected and no default_network configured (known networks: {known})")]
    NoNetworkSelected { known: String },
    #[error("unknown network {name:?} (known networks: {known})")]
    UnknownNetwork { name: String, known: String },
    #[error("environment variable {var} referenced by network {network:?} is not set")]
    MissingEnvVar { network: String, var: String },
    #[error("network {0:?} has no RPC endpoint configured")]
    MissingEndpoint(String),
    #[error("network {network:?} has an invalid RPC endpoint: {reason}")]
    InvalidEndpoint { network: String, reason: String },
}

/// Loads a `.env` file from the working directory into the process environment.
///
/// Variables that are already set keep their values. A missing file is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Project configuration as written in the config file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub default_network: Option<String>,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkEntry>,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub solidity: Option<SolidityConfig>,
}

/// One `[networks.<name>]` table, before environment expansion.
#[derive(Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NetworkEntry {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub accounts: Vec<String>,
}

impl fmt::Debug for NetworkEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkEntry")
            .field("url", &self.url)
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    #[serde(default = "default_artifacts_dir")]
    pub artifacts: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artifacts: default_artifacts_dir(),
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACTS_DIR)
}

/// Compiler settings the artifacts were built with.
///
/// These are only carried for the compiler toolchain and for display; nothing here is used
/// when deploying.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SolidityConfig {
    pub version: String,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub runs: Option<u32>,
}

impl fmt::Display for SolidityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solc {}", self.version)?;
        match (self.optimizer.enabled, self.optimizer.runs) {
            (true, Some(runs)) => write!(f, " (optimizer: {runs} runs)"),
            (true, None) => write!(f, " (optimizer enabled)"),
            (false, _) => write!(f, " (optimizer disabled)"),
        }
    }
}

impl ProjectConfig {
    /// Reads and parses a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Directory holding compiled artifacts, resolved against the directory of the config file.
    pub fn artifacts_dir(&self, project_root: impl AsRef<Path>) -> PathBuf {
        project_root.as_ref().join(&self.paths.artifacts)
    }

    /// Name of the network to use: the requested one, the configured default, or the only
    /// network declared.
    pub fn network_name<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, ConfigError> {
        if let Some(name) = requested.or(self.default_network.as_deref()) {
            return Ok(name);
        }
        let mut names = self.networks.keys();
        match (names.next(), names.next()) {
            (Some(only), None) => Ok(only),
            _ => Err(ConfigError::NoNetworkSelected {
                known: self.known_networks(),
            }),
        }
    }

    /// Resolves a network against the process environment.
    pub fn network(&self, requested: Option<&str>) -> Result<NetworkConfig, ConfigError> {
        self.network_with_env(requested, |var| std::env::var(var).ok())
    }

    /// Resolves a network, expanding `${VAR}` references with `lookup`.
    pub fn network_with_env(
        &self,
        requested: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<NetworkConfig, ConfigError> {
        let name = self.network_name(requested)?;
        let entry = self
            .networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: name.to_owned(),
                known: self.known_networks(),
            })?;

        let url = match &entry.url {
            Some(url) => expand_env(url, name, &lookup)?,
            None => String::new(),
        };
        let accounts = entry
            .accounts
            .iter()
            .map(|account| expand_env(account, name, &lookup).map(AccountSecret))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NetworkConfig {
            name: name.to_owned(),
            url,
            accounts,
        })
    }

    fn known_networks(&self) -> String {
        if self.networks.is_empty() {
            return "none".to_owned();
        }
        self.networks
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn expand_env(
    text: &str,
    network: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let mut missing = None;
    let expanded = ENV_REFERENCE.replace_all(text, |caps: &Captures| {
        let var = &caps[1];
        lookup(var).unwrap_or_else(|| {
            missing.get_or_insert_with(|| var.to_owned());
            String::new()
        })
    });
    match missing {
        Some(var) => Err(ConfigError::MissingEnvVar {
            network: network.to_owned(),
            var,
        }),
        None => Ok(expanded.into_owned()),
    }
}

/// An account credential: a hex-encoded private key.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountSecret(String);

impl AccountSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccountSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccountSecret(<redacted>)")
    }
}

/// A fully resolved network: its RPC endpoint and the accounts that may sign on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    name: String,
    url: String,
    accounts: Vec<AccountSecret>,
}

impl NetworkConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>, accounts: Vec<AccountSecret>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            accounts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn accounts(&self) -> &[AccountSecret] {
        &self.accounts
    }

    /// Parses the RPC endpoint, failing if none is configured.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingEndpoint(self.name.clone()));
        }
        Url::parse(url).map_err(|err| ConfigError::InvalidEndpoint {
            network: self.name.clone(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const CONFIG: &str = r#"
default_network = "sepolia"

[solidity]
version = "0.8.24"
optimizer = { enabled = true, runs = 200 }

[paths]
artifacts = "./client/src"

[networks.hardhat]

[networks.sepolia]
url = "${SEPOLIA_URL}"
accounts = ["0x${PRIVATE_KEY}"]
"#;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn parses_full_config() {
        let config = ProjectConfig::from_toml_str(CONFIG).unwrap();
        assert_eq!(config.default_network.as_deref(), Some("sepolia"));
        assert_eq!(config.networks.len(), 2);
        assert_eq!(config.paths.artifacts, PathBuf::from("./client/src"));
        let solidity = config.solidity.unwrap();
        assert_eq!(solidity.to_string(), "solc 0.8.24 (optimizer: 200 runs)");
    }

    #[test]
    fn defaults_artifacts_dir() {
        let config = ProjectConfig::from_toml_str("[networks.local]\nurl = \"http://x\"").unwrap();
        assert_eq!(config.paths.artifacts, PathBuf::from(DEFAULT_ARTIFACTS_DIR));
        assert_eq!(
            config.artifacts_dir("/project"),
            PathBuf::from("/project/artifacts")
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ProjectConfig::from_toml_str("[networks.local]\nrpc = \"http://x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn expands_environment() {
        let config = ProjectConfig::from_toml_str(CONFIG).unwrap();
        let network = config
            .network_with_env(
                None,
                env(&[("SEPOLIA_URL", "https://rpc.example"), ("PRIVATE_KEY", "abcd")]),
            )
            .unwrap();
        assert_eq!(network.name(), "sepolia");
        assert_eq!(network.url(), "https://rpc.example");
        assert_eq!(network.accounts(), &[AccountSecret::new("0xabcd")]);
    }

    #[test]
    fn missing_env_var_is_named() {
        let config = ProjectConfig::from_toml_str(CONFIG).unwrap();
        let err = config
            .network_with_env(Some("sepolia"), env(&[("SEPOLIA_URL", "https://rpc.example")]))
            .unwrap_err();
        match err {
            ConfigError::MissingEnvVar { network, var } => {
                assert_eq!(network, "sepolia");
                assert_eq!(var, "PRIVATE_KEY");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolving_twice_yields_identical_values() {
        let config = ProjectConfig::from_toml_str(CONFIG).unwrap();
        let lookup = env(&[("SEPOLIA_URL", "https://rpc.example"), ("PRIVATE_KEY", "abcd")]);
        let first = config.network_with_env(None, &lookup).unwrap();
        let second = config.network_with_env(None, &lookup).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn selects_network() {
        let config = ProjectConfig::from_toml_str(CONFIG).unwrap();
        assert_eq!(config.network_name(Some("hardhat")).unwrap(), "hardhat");
        assert_eq!(config.network_name(None).unwrap(), "sepolia");

        let err = config.network_with_env(Some("mainnet"), env(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown network \"mainnet\" (known networks: hardhat, sepolia)"
        );

        let single = ProjectConfig::from_toml_str("[networks.local]\nurl = \"http://x\"").unwrap();
        assert_eq!(single.network_name(None).unwrap(), "local");

        let empty = ProjectConfig::default();
        assert!(matches!(
            empty.network_name(None),
            Err(ConfigError::NoNetworkSelected { .. })
        ));
    }

    #[test]
    fn network_without_url_has_no_endpoint() {
        let config = ProjectConfig::from_toml_str(CONFIG).unwrap();
        let hardhat = config.network_with_env(Some("hardhat"), env(&[])).unwrap();
        assert!(hardhat.accounts().is_empty());
        assert!(matches!(
            hardhat.endpoint(),
            Err(ConfigError::MissingEndpoint(name)) if name == "hardhat"
        ));
    }

    #[test]
    fn invalid_endpoint_is_reported() {
        let network = NetworkConfig::new("local", "not a url", vec![]);
        assert!(matches!(
            network.endpoint(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        let network = NetworkConfig::new("local", "http://127.0.0.1:8545", vec![]);
        assert_eq!(network.endpoint().unwrap().port(), Some(8545));
    }

    #[test]
    fn secrets_are_redacted() {
        let network = NetworkConfig::new(
            "local",
            "http://127.0.0.1:8545",
            vec![AccountSecret::new("0xdeadbeef")],
        );
        let debug = format!("{network:?}");
        assert!(!debug.contains("deadbeef"));
        assert!(debug.contains("<redacted>"));
    }
}

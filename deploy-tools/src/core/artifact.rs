// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts are produced by an external compiler. Both the Hardhat layout
//! (`"bytecode": "0x…"`) and the Foundry layout (`"bytecode": { "object": "0x…" }`) are
//! understood.

use std::{
    fmt, fs,
    path::{Component, Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;

use crate::utils::decode0x;

/// Directory name Hardhat uses for compiler inputs/outputs, which are not contract artifacts.
const BUILD_INFO_DIR: &str = "build-info";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("no artifact for contract {name} found in {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error("contract name {name} is ambiguous, candidates: {}", display_paths(.paths))]
    Ambiguous { name: String, paths: Vec<PathBuf> },
    #[error("could not read artifact {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed artifact for {name}: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("artifact for {0} has no bytecode (is it abstract or an interface?)")]
    MissingBytecode(String),
    #[error("artifact for {0} has unlinked library references")]
    UnlinkedLibraries(String),
    #[error("artifact for {name} has invalid bytecode: {source}")]
    InvalidBytecode {
        name: String,
        source: hex::FromHexError,
    },
    #[error(
        "constructor of {name} takes {expected} argument(s), but deployments pass none"
    )]
    ConstructorArguments { name: String, expected: usize },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A compiled contract: its interface and creation bytecode.
#[derive(Clone, PartialEq)]
pub struct CompiledArtifact {
    name: String,
    abi: JsonAbi,
    bytecode: Bytes,
}

impl fmt::Debug for CompiledArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledArtifact")
            .field("name", &self.name)
            .field("functions", &self.abi.functions.len())
            .field("bytecode_len", &self.bytecode.len())
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    contract_name: Option<String>,
    abi: JsonAbi,
    bytecode: RawBytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn as_str(&self) -> &str {
        match self {
            Self::Hex(text) | Self::Object { object: text } => text,
        }
    }
}

impl CompiledArtifact {
    /// Parses and validates an artifact.
    ///
    /// `name` is used when the artifact does not record its own contract name.
    pub fn from_json(name: &str, json: &[u8]) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_json::from_slice(json).map_err(|source| ArtifactError::Json {
            name: name.to_owned(),
            source,
        })?;
        let name = raw.contract_name.unwrap_or_else(|| name.to_owned());

        let code = raw.bytecode.as_str().trim();
        // Library placeholders look like `__$<hash>$__` (or `__Lib____` for old solc)
        if code.contains("__") {
            return Err(ArtifactError::UnlinkedLibraries(name));
        }
        let bytecode = decode0x(code).map_err(|source| ArtifactError::InvalidBytecode {
            name: name.clone(),
            source,
        })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::MissingBytecode(name));
        }

        if let Some(constructor) = &raw.abi.constructor {
            if !constructor.inputs.is_empty() {
                return Err(ArtifactError::ConstructorArguments {
                    name,
                    expected: constructor.inputs.len(),
                });
            }
        }

        Ok(Self {
            name,
            abi: raw.abi,
            bytecode: bytecode.into(),
        })
    }

    /// Reads and validates an artifact file.
    pub fn read(name: &str, path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let json = fs::read(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(name, &json)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// Creation bytecode sent as the input of the deployment transaction.
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }
}

/// Directory of compiled artifacts, looked up by contract name.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Finds and validates the artifact for a contract.
    ///
    /// `handle` is either a bare contract name (`Carpooling`) or a fully qualified one
    /// (`contracts/Carpooling.sol:Carpooling`).
    pub fn resolve(&self, handle: &str) -> Result<CompiledArtifact, ArtifactError> {
        let (name, path) = match handle.rsplit_once(':') {
            Some((source, name)) => (name, self.dir.join(source).join(format!("{name}.json"))),
            None => (handle, self.find(handle)?),
        };
        debug!(@grey, "reading artifact for {name} from {}", path.display());
        CompiledArtifact::read(name, path)
    }

    fn find(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        let pattern = format!(
            "{}/**/{}.json",
            glob::Pattern::escape(&self.dir.to_string_lossy()),
            glob::Pattern::escape(name),
        );
        let mut paths: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|path| {
                !path
                    .components()
                    .any(|c| c == Component::Normal(BUILD_INFO_DIR.as_ref()))
            })
            .collect();
        paths.sort();
        match paths.len() {
            0 => Err(ArtifactError::NotFound {
                name: name.to_owned(),
                dir: self.dir.clone(),
            }),
            1 => Ok(paths.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_owned(),
                paths,
            }),
        }
    }
}

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de::Error as TomlError;

/// Default value for `message_passer_address` in [`L2Config`], the L2ToL1MessagePasser predeploy.
const DEFAULT_MESSAGE_PASSER_ADDRESS: Address =
    address!("4200000000000000000000000000000000000016");

/// Default value for `timeout_secs` in [`ProverSettings`].
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] TomlError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L1Config {
    pub rpc_url: String,

    /// OptimismPortal-like contract.
    pub portal_address: Address,

    /// L2OutputOracle-like contract, read while fault proofs are not active.
    pub l2_output_oracle_address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2Config {
    pub rpc_url: String,

    #[serde(default = "default_message_passer_address")]
    pub message_passer_address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProverSettings {
    /// Deadline for a single proof, covering every chain read it makes.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProverSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProverSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Use JSON format for logs instead of compact format.
    #[serde(default)]
    pub json: bool,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProverConfig {
    pub l1: L1Config,
    pub l2: L2Config,

    #[serde(default)]
    pub prover: ProverSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProverConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

fn default_message_passer_address() -> Address {
    DEFAULT_MESSAGE_PASSER_ADDRESS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

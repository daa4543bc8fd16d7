use alloy::primitives::Address;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chain::{self, ChainConfig};

/// Env var holding a local signing key. Never stored in the config file.
pub const PRIVATE_KEY_ENV: &str = "NOMO_PRIVATE_KEY";

/// Env var overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "NOMO_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid contract address {0:?}")]
    InvalidAddress(String),
    #[error("invalid RPC url {0:?}")]
    InvalidUrl(String),
    #[error("invalid private key in NOMO_PRIVATE_KEY")]
    InvalidKey,
    #[error("no RPC url configured for chain {0}")]
    NoRpcUrl(u64),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractConfig {
    /// Prediction market address. Empty or `0x...` means not deployed yet.
    #[serde(default)]
    pub address: String,
}

#[derive(Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of an external signing wallet.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Loaded from `NOMO_PRIVATE_KEY`.
    #[serde(skip)]
    pub private_key: Option<String>,
}

// Keeps the key out of `{:?}` output.
impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("endpoint", &self.endpoint)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Feature flags for staged rollout.
#[derive(Debug, Clone, Deserialize)]
pub struct Features {
    #[serde(default = "default_true")]
    pub enable_wallet_connection: bool,
    /// Off until the contract is live.
    #[serde(default)]
    pub enable_betting: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default = "default_preferences_path")]
    pub path: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from(".nomo/preferences.json")
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self {
            enable_wallet_connection: true,
            enable_betting: false,
        }
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
        }
    }
}

impl Config {
    /// Load config from a TOML file, then overlay secrets from the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env();
        Ok(config)
    }

    /// Load from `NOMO_CONFIG` (default `config.toml`). A missing file yields defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
        if Path::new(&path).exists() {
            Self::load(&path)
        } else {
            let mut config = Self::default();
            config.apply_env();
            Ok(config)
        }
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.contract_address()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(PRIVATE_KEY_ENV) {
            if !key.trim().is_empty() {
                self.wallet.private_key = Some(key.trim().to_string());
            }
        }
    }

    /// Configured contract address, falling back to the built-in constant.
    pub fn contract_address(&self) -> Result<Option<Address>, ConfigError> {
        match parse_contract_address(&self.contract.address)? {
            Some(addr) => Ok(Some(addr)),
            None => Ok(chain::PREDICTION_MARKET),
        }
    }
}

/// Parse a configured address. Placeholders mean "not deployed".
pub fn parse_contract_address(raw: &str) -> Result<Option<Address>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "0x" || raw == "0x..." {
        return Ok(None);
    }
    raw.parse::<Address>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidAddress(raw.to_string()))
}

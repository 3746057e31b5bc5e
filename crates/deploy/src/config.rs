//! Resolved deployment configuration.
//!
//! Everything the orchestrator needs is gathered here once at process start
//! and validated eagerly, instead of being read from the environment ad hoc
//! at each step. The signing key deliberately lives outside this struct so
//! it never ends up in a saved config file.

use std::path::PathBuf;

use alloy_core::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::DeployError;
use crate::network::Network;

/// The default name for the saved configuration file.
pub const CONFIG_FILENAME: &str = "Tokup.toml";

/// Token supply passed to the initializer (whole tokens).
pub const INITIAL_SUPPLY: u64 = 11_000_000_000;

/// Gas limit for each deployment transaction.
pub const DEPLOY_GAS_LIMIT: u64 = 5_000_000;

/// Confirmation window for deployment transactions, in seconds.
pub const CONFIRM_TIMEOUT_SECS: u64 = 120;

/// Fully resolved configuration for one deployment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// The target network.
    pub network: Network,
    /// The RPC endpoint used to reach it.
    pub rpc_url: String,
    /// Ticker used when reporting balances and costs.
    pub currency_symbol: String,
    /// Artifact name of the token contract to instantiate.
    pub contract: String,
    /// Directory holding compiled contract artifacts.
    pub artifacts_dir: PathBuf,

    /// Per-block mining reward passed to the initializer.
    pub mining_reward: u64,
    /// Staking annual percentage yield passed to the initializer.
    pub staking_apy: u64,
    /// Transfer tax percentage passed to the initializer.
    pub tax_percent: u8,
    /// Initial mining difficulty; zero when not configured.
    pub mining_difficulty: U256,
}

impl DeployConfig {
    /// Save the configuration to a TOML file.
    pub fn save_to_file(&self, path: &PathBuf) -> Result<(), DeployError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DeployError::config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content).map_err(|e| {
            DeployError::config(format!("failed to write config to {}: {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Load a configuration from a TOML file, or from `Tokup.toml` inside a
    /// directory.
    pub fn load_from_file(path: &PathBuf) -> Result<Self, DeployError> {
        if !path.exists() {
            return Err(DeployError::config(format!(
                "configuration file or directory not found: {}",
                path.display()
            )));
        }

        let config_path = if path.is_dir() {
            path.join(CONFIG_FILENAME)
        } else {
            path.to_path_buf()
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            DeployError::config(format!(
                "failed to read config from {}: {e}",
                config_path.display()
            ))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DeployError::config(format!("failed to parse config file: {e}")))?;
        tracing::info!(path = %config_path.display(), "Configuration loaded");
        Ok(config)
    }
}

/// Builder validating a [`DeployConfig`] from CLI inputs.
#[derive(Debug, Clone, Default)]
pub struct DeployConfigBuilder {
    network: Option<Network>,
    rpc_url: Option<String>,
    currency_symbol: Option<String>,
    contract: Option<String>,
    artifacts_dir: Option<PathBuf>,
    mining_reward: Option<u64>,
    staking_apy: Option<u64>,
    tax_percent: Option<u8>,
    mining_difficulty: Option<String>,
}

impl DeployConfigBuilder {
    pub fn new(network: Network) -> Self {
        Self {
            network: Some(network),
            ..Self::default()
        }
    }

    /// Override the network's default RPC endpoint.
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    /// Override the native-currency ticker used in reports.
    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = Some(symbol.into());
        self
    }

    pub fn contract(mut self, name: impl Into<String>) -> Self {
        self.contract = Some(name.into());
        self
    }

    pub fn artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = Some(dir.into());
        self
    }

    pub fn mining_reward(mut self, reward: u64) -> Self {
        self.mining_reward = Some(reward);
        self
    }

    pub fn staking_apy(mut self, apy: u64) -> Self {
        self.staking_apy = Some(apy);
        self
    }

    pub fn tax_percent(mut self, percent: u8) -> Self {
        self.tax_percent = Some(percent);
        self
    }

    /// Mining difficulty as a decimal or `0x`-hex string. Empty and `"null"`
    /// inputs mean "not configured" and resolve to zero.
    pub fn mining_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.mining_difficulty = Some(difficulty.into());
        self
    }

    /// Validate and produce the resolved configuration.
    ///
    /// Fails with a configuration error before any network call is made if a
    /// required field is absent.
    pub fn build(self) -> Result<DeployConfig, DeployError> {
        let network = self
            .network
            .ok_or_else(|| DeployError::config("target network not set"))?;

        let contract = match self.contract {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(DeployError::config(
                    "contract name not set (--contract or TOKUP_CONTRACT)",
                ));
            }
        };

        let mining_reward = self
            .mining_reward
            .ok_or_else(|| DeployError::config("mining reward not set (--mining-reward)"))?;
        let staking_apy = self
            .staking_apy
            .ok_or_else(|| DeployError::config("staking APY not set (--staking-apy)"))?;
        let tax_percent = self
            .tax_percent
            .ok_or_else(|| DeployError::config("tax percent not set (--tax-percent)"))?;

        let mining_difficulty = parse_difficulty(self.mining_difficulty.as_deref())?;

        let rpc_url = self
            .rpc_url
            .unwrap_or_else(|| network.default_rpc_url().to_string());
        let currency_symbol = self
            .currency_symbol
            .unwrap_or_else(|| network.currency_symbol().to_string());

        Ok(DeployConfig {
            network,
            rpc_url,
            currency_symbol,
            contract,
            artifacts_dir: self.artifacts_dir.unwrap_or_else(|| PathBuf::from("artifacts")),
            mining_reward,
            staking_apy,
            tax_percent,
            mining_difficulty,
        })
    }
}

/// Parse the optional mining difficulty. Absent, empty and `"null"` all mean
/// zero.
fn parse_difficulty(raw: Option<&str>) -> Result<U256, DeployError> {
    let raw = match raw {
        None => return Ok(U256::ZERO),
        Some(s) => s.trim(),
    };
    if raw.is_empty() || raw == "null" {
        return Ok(U256::ZERO);
    }

    let parsed = if let Some(digits) = raw.strip_prefix("0x") {
        U256::from_str_radix(digits, 16)
    } else {
        U256::from_str_radix(raw, 10)
    };
    parsed.map_err(|e| DeployError::config(format!("invalid mining difficulty '{raw}': {e}")))
}

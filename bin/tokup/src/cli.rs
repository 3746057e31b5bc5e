use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokup_deploy::Network;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "tokup")]
#[command(
    author,
    version,
    about = "Deploy an upgradeable token proxy to BSC/Polygon-style networks"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "TOKUP_VERBOSITY", default_value_t = LevelFilter::INFO, global = true)]
    pub verbosity: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy the token implementation and its UUPS proxy.
    Deploy(DeployArgs),
    /// Query a holder's token balance on a deployed token.
    Balance(BalanceArgs),
}

#[derive(Debug, Parser)]
pub struct DeployArgs {
    /// The target network (localhost, hardhat, bsc-testnet, bsc,
    /// polygon-amoy, polygon) or a custom RPC URL.
    #[arg(short, long, env = "TOKUP_NETWORK", default_value_t = Network::Localhost)]
    pub network: Network,

    /// Override the network's default RPC endpoint.
    #[arg(long, alias = "rpc", env = "TOKUP_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Hex private key of the deploying account.
    #[arg(long, env = "TOKUP_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Artifact name of the token contract to deploy.
    #[arg(short, long, env = "TOKUP_CONTRACT")]
    pub contract: Option<String>,

    /// Directory holding compiled contract artifacts.
    #[arg(long, env = "TOKUP_ARTIFACTS", default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Per-block mining reward passed to the initializer.
    #[arg(long, env = "TOKUP_MINING_REWARD")]
    pub mining_reward: Option<u64>,

    /// Staking APY passed to the initializer.
    #[arg(long, env = "TOKUP_STAKING_APY")]
    pub staking_apy: Option<u64>,

    /// Transfer tax percentage passed to the initializer.
    #[arg(long, env = "TOKUP_TAX_PERCENT")]
    pub tax_percent: Option<u8>,

    /// Initial mining difficulty (decimal or 0x-hex). Defaults to zero.
    #[arg(long, env = "TOKUP_MINING_DIFFICULTY")]
    pub mining_difficulty: Option<String>,

    /// Override the native-currency ticker used in reports.
    #[arg(long, env = "TOKUP_CURRENCY")]
    pub currency: Option<String>,

    /// Path to an existing Tokup.toml configuration to load.
    ///
    /// When provided, the deployment uses the configuration from this file
    /// instead of building one from the other CLI arguments.
    #[arg(long, alias = "conf", env = "TOKUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip saving the resolved configuration next to the artifacts.
    #[arg(long, env = "TOKUP_NO_SAVE_CONFIG")]
    pub no_save_config: bool,
}

#[derive(Debug, Parser)]
pub struct BalanceArgs {
    /// The target network or a custom RPC URL.
    #[arg(short, long, env = "TOKUP_NETWORK", default_value_t = Network::Localhost)]
    pub network: Network,

    /// Override the network's default RPC endpoint.
    #[arg(long, alias = "rpc", env = "TOKUP_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Address of the deployed token contract.
    #[arg(short, long, env = "TOKUP_TOKEN_ADDRESS")]
    pub token: String,

    /// Address of the holder to query.
    #[arg(long, alias = "wallet", env = "TOKUP_WALLET_ADDRESS")]
    pub holder: String,
}

//! tokup-deploy - Deployment library for UUPS token proxies.
//!
//! This crate provides the deployment workflow behind the `tokup` CLI:
//! preflight checks, the gas-pricing policy, implementation + ERC-1967 proxy
//! deployment over raw transactions, and the ERC-20 balance lookup.

pub mod abi;
pub mod artifact;
pub mod balance;
pub mod config;
mod deployer;
mod error;
pub mod gas;
mod network;
mod rpc;
mod traits;
pub mod tx;
pub mod units;

mod proxy;

pub use config::{CONFIG_FILENAME, DeployConfig, DeployConfigBuilder};
pub use deployer::{Deployer, DeploymentReport, initializer_args, min_deploy_balance};
pub use error::DeployError;
pub use network::Network;
pub use proxy::UupsDeployer;
pub use rpc::{RpcClient, TransactionReceipt};
pub use traits::{ChainClient, DeployRequest, Deployment, ProxyDeploy};
pub use tx::TxSigner;

//! Collaborator seams of the deployment orchestrator.
//!
//! The orchestrator never talks to the network directly; it goes through
//! these two traits so the workflow can be exercised against mocks.

use std::time::Duration;

use alloy_core::primitives::{Address, B256, U256};

use crate::error::DeployError;
use crate::rpc::TransactionReceipt;

/// Read-only chain queries the orchestrator needs for its preflight and
/// gas-pricing steps.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Native-currency balance of an account, in wei.
    async fn native_balance(&self, address: Address) -> Result<U256, DeployError>;

    /// Current network gas price, in wei.
    async fn gas_price(&self) -> Result<U256, DeployError>;
}

/// Everything the proxy deployer needs to know about one deployment.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// Artifact name of the token implementation.
    pub contract: String,
    /// ABI-encoded `initialize(...)` call forwarded through the proxy
    /// constructor.
    pub init_calldata: Vec<u8>,
    /// Gas price for both deployment transactions, in wei.
    pub gas_price: U256,
    /// Gas limit for each deployment transaction.
    pub gas_limit: u64,
    /// Confirmation window for each transaction.
    pub timeout: Duration,
}

/// A submitted proxy deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    /// Address the proxy will live at.
    pub address: Address,
    /// Hash of the proxy deployment transaction.
    pub tx_hash: B256,
}

/// The proxy-deployment collaborator. Opaque to the orchestrator: it only
/// hands over the request and waits for the result.
#[allow(async_fn_in_trait)]
pub trait ProxyDeploy {
    /// Submit the proxy deployment.
    async fn deploy_proxy(&self, request: &DeployRequest) -> Result<Deployment, DeployError>;

    /// Block until the deployment transaction is mined, or `timeout`
    /// elapses, and return its receipt.
    async fn wait_deployed(
        &self,
        deployment: &Deployment,
        timeout: Duration,
    ) -> Result<TransactionReceipt, DeployError>;
}

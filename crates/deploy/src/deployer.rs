//! The deployment orchestrator.
//!
//! One fixed forward path per invocation: preflight the deployer balance,
//! pick a gas price, hand the deployment to the proxy collaborator, wait for
//! confirmation and report. Either every field of the report is populated or
//! the run fails before any of them is.

use std::time::Duration;

use alloy_core::primitives::{Address, B256, U256};

use crate::abi::{self, AbiValue};
use crate::config::{CONFIRM_TIMEOUT_SECS, DEPLOY_GAS_LIMIT, DeployConfig, INITIAL_SUPPLY};
use crate::error::DeployError;
use crate::gas;
use crate::traits::{ChainClient, DeployRequest, ProxyDeploy};
use crate::units::{self, NATIVE_DECIMALS};

/// Minimum deployer balance required before a deployment is attempted:
/// 0.1 native units. Submitting below this risks running out of gas
/// mid-deployment, wasting the fee with no contract to show for it.
pub fn min_deploy_balance() -> U256 {
    units::ether(1) / U256::from(10)
}

/// Everything a successful run reports.
#[derive(Debug, Clone)]
pub struct DeploymentReport {
    /// Address of the deployed proxy.
    pub address: Address,
    /// Hash of the proxy deployment transaction.
    pub tx_hash: B256,
    /// Gas consumed by the proxy deployment transaction.
    pub gas_used: U256,
    /// Gas price the deployment paid, in wei.
    pub gas_price: U256,
    /// Approximate deployment cost: gas used times gas price, in wei.
    pub cost: U256,
}

impl DeploymentReport {
    /// The cost formatted in whole native units.
    pub fn cost_formatted(&self) -> String {
        units::format_units(self.cost, NATIVE_DECIMALS)
    }
}

/// Ordered initializer arguments: supply, owner, mining reward, mining
/// difficulty, staking APY, tax recipient, tax percent. Owner and tax
/// recipient are both the deploying account.
pub fn initializer_args(config: &DeployConfig, deployer: Address) -> Vec<AbiValue> {
    vec![
        AbiValue::Uint(U256::from(INITIAL_SUPPLY)),
        AbiValue::Address(deployer),
        AbiValue::Uint(U256::from(config.mining_reward)),
        AbiValue::Uint(config.mining_difficulty),
        AbiValue::Uint(U256::from(config.staking_apy)),
        AbiValue::Address(deployer),
        AbiValue::Uint(U256::from(config.tax_percent)),
    ]
}

/// Single-shot deployment orchestrator.
pub struct Deployer<C, P> {
    config: DeployConfig,
    deployer_address: Address,
    client: C,
    proxy: P,
}

impl<C: ChainClient, P: ProxyDeploy> Deployer<C, P> {
    pub fn new(config: DeployConfig, deployer_address: Address, client: C, proxy: P) -> Self {
        Self {
            config,
            deployer_address,
            client,
            proxy,
        }
    }

    /// Run the preflight-deploy-report workflow exactly once.
    pub async fn run(&self) -> Result<DeploymentReport, DeployError> {
        let symbol = &self.config.currency_symbol;
        tracing::info!(
            deployer = %self.deployer_address,
            network = %self.config.network,
            contract = %self.config.contract,
            "Starting deployment"
        );

        // Step 1: balance preflight.
        let balance = self.client.native_balance(self.deployer_address).await?;
        tracing::info!(
            "Account balance: {} {symbol}",
            units::format_units(balance, NATIVE_DECIMALS)
        );
        let minimum = min_deploy_balance();
        if balance < minimum {
            return Err(DeployError::Preflight {
                have: units::format_units(balance, NATIVE_DECIMALS),
                need: units::format_units(minimum, NATIVE_DECIMALS),
                symbol: symbol.clone(),
            });
        }

        // Step 2: gas pricing policy.
        let gas_price = if self.config.network.is_local() {
            gas::nominal_gas_price()
        } else {
            match self.client.gas_price().await {
                Ok(observed) => gas::bump_observed(observed),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "Gas price query failed, using the nominal price"
                    );
                    gas::nominal_gas_price()
                }
            }
        };
        tracing::info!(
            "Using gas price: {} gwei",
            units::format_units(gas_price, 9)
        );

        // Step 3: hand over to the proxy deployer.
        let init_calldata = abi::encode_call(
            abi::INITIALIZE_SIGNATURE,
            &initializer_args(&self.config, self.deployer_address),
        );
        let request = DeployRequest {
            contract: self.config.contract.clone(),
            init_calldata,
            gas_price,
            gas_limit: DEPLOY_GAS_LIMIT,
            timeout: Duration::from_secs(CONFIRM_TIMEOUT_SECS),
        };
        let deployment = self.proxy.deploy_proxy(&request).await?;

        // Step 4: confirm and report.
        tracing::info!(tx_hash = %deployment.tx_hash, "Waiting for deployment confirmations...");
        let receipt = self.proxy.wait_deployed(&deployment, request.timeout).await?;

        let cost = receipt.gas_used * gas_price;
        let report = DeploymentReport {
            address: deployment.address,
            tx_hash: deployment.tx_hash,
            gas_used: receipt.gas_used,
            gas_price,
            cost,
        };

        tracing::info!(address = %report.address, "Deployment successful");
        tracing::info!("Gas used: {}", report.gas_used);
        tracing::info!("Deployment cost: {} {symbol}", report.cost_formatted());
        Ok(report)
    }
}

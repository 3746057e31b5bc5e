//! UUPS proxy deployment.
//!
//! Two transactions per deployment: the token implementation first, then an
//! ERC-1967 proxy whose constructor receives the implementation address and
//! the `initialize` calldata. Under the UUPS pattern the proxy itself
//! carries no upgrade logic; upgrades go through the implementation.

use std::path::PathBuf;

use alloy_core::primitives::{Address, B256, U256};

use crate::abi;
use crate::artifact::{Artifact, PROXY_ARTIFACT};
use crate::error::DeployError;
use crate::rpc::{RpcClient, TransactionReceipt};
use crate::traits::{DeployRequest, Deployment, ProxyDeploy};
use crate::tx::{LegacyTransaction, TxSigner, create_address};

/// Deploys implementation + ERC-1967 proxy pairs over raw transactions.
#[derive(Debug, Clone)]
pub struct UupsDeployer {
    rpc: RpcClient,
    signer: TxSigner,
    chain_id: u64,
    artifacts_dir: PathBuf,
}

impl UupsDeployer {
    pub fn new(rpc: RpcClient, signer: TxSigner, chain_id: u64, artifacts_dir: PathBuf) -> Self {
        Self {
            rpc,
            signer,
            chain_id,
            artifacts_dir,
        }
    }

    /// Sign and submit a contract-creation transaction.
    async fn send_create(
        &self,
        data: Vec<u8>,
        gas_price: U256,
        gas_limit: u64,
    ) -> Result<(B256, Address), DeployError> {
        let nonce = self.rpc.transaction_count(self.signer.address()).await?;
        let tx = LegacyTransaction {
            nonce,
            gas_price,
            gas_limit,
            to: None,
            value: U256::ZERO,
            data,
        };
        let raw = self.signer.sign_legacy(&tx, self.chain_id)?;
        let tx_hash = self.rpc.send_raw_transaction(&raw).await?;
        Ok((tx_hash, create_address(self.signer.address(), nonce)))
    }
}

impl ProxyDeploy for UupsDeployer {
    async fn deploy_proxy(&self, request: &DeployRequest) -> Result<Deployment, DeployError> {
        let implementation = Artifact::load(&self.artifacts_dir, &request.contract)?;
        let proxy = Artifact::load(&self.artifacts_dir, PROXY_ARTIFACT)?;

        // Implementation first: the proxy constructor delegatecalls into it,
        // so it must be mined before the proxy is submitted.
        tracing::info!(contract = %implementation.contract_name, "Deploying implementation...");
        let (impl_tx_hash, expected_impl_addr) = self
            .send_create(
                implementation.bytecode_bytes()?,
                request.gas_price,
                request.gas_limit,
            )
            .await?;

        let impl_receipt = self
            .rpc
            .wait_for_receipt(impl_tx_hash, request.timeout)
            .await?;
        if !impl_receipt.succeeded() {
            return Err(DeployError::deployment(format!(
                "implementation deployment reverted in transaction {impl_tx_hash}"
            )));
        }
        let impl_address = impl_receipt.contract_address.unwrap_or(expected_impl_addr);
        tracing::info!(address = %impl_address, "Implementation deployed");

        let mut proxy_bytecode = proxy.bytecode_bytes()?;
        proxy_bytecode.extend_from_slice(&abi::encode_address_and_bytes(
            impl_address,
            &request.init_calldata,
        ));

        tracing::info!("Deploying ERC-1967 proxy...");
        let (proxy_tx_hash, proxy_address) = self
            .send_create(proxy_bytecode, request.gas_price, request.gas_limit)
            .await?;

        Ok(Deployment {
            address: proxy_address,
            tx_hash: proxy_tx_hash,
        })
    }

    async fn wait_deployed(
        &self,
        deployment: &Deployment,
        timeout: std::time::Duration,
    ) -> Result<TransactionReceipt, DeployError> {
        let receipt = self.rpc.wait_for_receipt(deployment.tx_hash, timeout).await?;
        if !receipt.succeeded() {
            return Err(DeployError::deployment(format!(
                "proxy deployment reverted in transaction {}",
                deployment.tx_hash
            )));
        }
        Ok(receipt)
    }
}

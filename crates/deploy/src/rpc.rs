//! JSON-RPC client for the target network.
//!
//! One request in flight at a time; every call either succeeds once or the
//! whole run fails. The only loop is the receipt poll, bounded by the fixed
//! confirmation window.

use std::time::Duration;

use alloy_core::primitives::{Address, B256, U64, U256};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::DeployError;
use crate::traits::ChainClient;
use crate::units;

/// Timeout for a single RPC request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between receipt polling attempts.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// A mined transaction receipt, reduced to the fields the workflow reports.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    /// Populated for contract-creation transactions.
    pub contract_address: Option<Address>,
    pub gas_used: U256,
    /// `0x1` on success, `0x0` on revert.
    pub status: Option<U64>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.is_none_or(|s| s == U64::from(1))
    }
}

/// HTTP JSON-RPC client bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    url: String,
}

impl RpcClient {
    pub fn new(url: &str) -> Result<Self, DeployError> {
        Url::parse(url).map_err(|e| DeployError::config(format!("invalid RPC URL '{url}': {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DeployError::network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make a JSON-RPC call and deserialize the `result` field.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, DeployError> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({
                "jsonrpc": "2.0",
                "method": method,
                "params": params,
                "id": 1
            }))
            .send()
            .await
            .map_err(|e| DeployError::network(format!("failed to send {method} request: {e}")))?;

        let result: Value = response
            .json()
            .await
            .map_err(|e| DeployError::network(format!("failed to parse {method} response: {e}")))?;

        if let Some(error) = result.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown");
            return Err(DeployError::network(format!("{method} failed: {message}")));
        }

        let result_value = result
            .get("result")
            .ok_or_else(|| DeployError::network(format!("no result in {method} response")))?
            .clone();

        serde_json::from_value(result_value).map_err(|e| {
            DeployError::network(format!("failed to deserialize {method} result: {e}"))
        })
    }

    pub async fn chain_id(&self) -> Result<u64, DeployError> {
        let quantity: String = self.call("eth_chainId", vec![]).await?;
        let value = units::parse_hex_quantity(&quantity)?;
        Ok(value.to::<u64>())
    }

    pub async fn get_balance(&self, address: Address) -> Result<U256, DeployError> {
        let quantity: String = self
            .call(
                "eth_getBalance",
                vec![
                    serde_json::json!(address.to_string()),
                    serde_json::json!("latest"),
                ],
            )
            .await?;
        units::parse_hex_quantity(&quantity)
    }

    pub async fn get_gas_price(&self) -> Result<U256, DeployError> {
        let quantity: String = self.call("eth_gasPrice", vec![]).await?;
        units::parse_hex_quantity(&quantity)
    }

    pub async fn transaction_count(&self, address: Address) -> Result<u64, DeployError> {
        let quantity: String = self
            .call(
                "eth_getTransactionCount",
                vec![
                    serde_json::json!(address.to_string()),
                    serde_json::json!("pending"),
                ],
            )
            .await?;
        let value = units::parse_hex_quantity(&quantity)?;
        Ok(value.to::<u64>())
    }

    /// Deployed code at an address; `0x` means no contract lives there.
    pub async fn get_code(&self, address: Address) -> Result<String, DeployError> {
        self.call(
            "eth_getCode",
            vec![
                serde_json::json!(address.to_string()),
                serde_json::json!("latest"),
            ],
        )
        .await
    }

    /// Read-only contract call, returning the raw ABI-encoded result.
    pub async fn eth_call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, DeployError> {
        let result: String = self
            .call(
                "eth_call",
                vec![
                    serde_json::json!({
                        "to": to.to_string(),
                        "data": format!("0x{}", hex::encode(data)),
                    }),
                    serde_json::json!("latest"),
                ],
            )
            .await?;
        let digits = result.strip_prefix("0x").unwrap_or(&result);
        hex::decode(digits)
            .map_err(|e| DeployError::network(format!("invalid eth_call return data: {e}")))
    }

    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256, DeployError> {
        self.call(
            "eth_sendRawTransaction",
            vec![serde_json::json!(format!("0x{}", hex::encode(raw)))],
        )
        .await
    }

    pub async fn get_transaction_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<Option<TransactionReceipt>, DeployError> {
        self.call(
            "eth_getTransactionReceipt",
            vec![serde_json::json!(tx_hash.to_string())],
        )
        .await
    }

    /// Poll for a transaction receipt until it appears or `timeout` elapses.
    pub async fn wait_for_receipt(
        &self,
        tx_hash: B256,
        timeout: Duration,
    ) -> Result<TransactionReceipt, DeployError> {
        let start = std::time::Instant::now();
        loop {
            if let Some(receipt) = self.get_transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            if start.elapsed() > timeout {
                return Err(DeployError::network(format!(
                    "timed out after {}s waiting for transaction {tx_hash} to be mined",
                    timeout.as_secs()
                )));
            }
            tracing::trace!(tx_hash = %tx_hash, "Receipt not available yet, polling...");
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
    }
}

impl ChainClient for RpcClient {
    async fn native_balance(&self, address: Address) -> Result<U256, DeployError> {
        self.get_balance(address).await
    }

    async fn gas_price(&self) -> Result<U256, DeployError> {
        self.get_gas_price().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_invalid_url_rejected() {
        assert!(matches!(
            RpcClient::new("not a url"),
            Err(DeployError::Config(_))
        ));
        assert!(RpcClient::new("http://127.0.0.1:8545").is_ok());
    }

    #[test]
    fn test_receipt_deserialization() {
        let json = serde_json::json!({
            "transactionHash":
                "0x00000000000000000000000000000000000000000000000000000000000def00",
            "contractAddress": "0x0000000000000000000000000000000000000abc",
            "gasUsed": "0x1e8480",
            "status": "0x1",
            "blockNumber": "0x10",
            "logs": [],
        });
        let receipt: TransactionReceipt = serde_json::from_value(json).unwrap();
        assert_eq!(receipt.gas_used, U256::from(2_000_000u64));
        assert_eq!(
            receipt.contract_address,
            Some(Address::from_str("0x0000000000000000000000000000000000000abc").unwrap())
        );
        assert!(receipt.succeeded());
    }

    #[test]
    fn test_reverted_receipt() {
        let json = serde_json::json!({
            "transactionHash":
                "0x00000000000000000000000000000000000000000000000000000000000def00",
            "contractAddress": null,
            "gasUsed": "0x5208",
            "status": "0x0",
        });
        let receipt: TransactionReceipt = serde_json::from_value(json).unwrap();
        assert!(!receipt.succeeded());
    }
}

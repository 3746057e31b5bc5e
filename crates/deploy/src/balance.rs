//! Token balance lookup.
//!
//! A single read-only `balanceOf` call plus formatting, with a code-presence
//! check first so a typo'd token address fails loudly instead of returning a
//! zero balance.

use alloy_core::primitives::{Address, U256};

use crate::abi::{self, AbiValue};
use crate::error::DeployError;
use crate::rpc::RpcClient;
use crate::units;

/// Decimals of the token itself (fixed by the contract).
pub const TOKEN_DECIMALS: u32 = 18;

/// A holder's token balance.
#[derive(Debug, Clone)]
pub struct TokenBalance {
    /// Raw balance in base units.
    pub raw: U256,
    /// Balance formatted with [`TOKEN_DECIMALS`].
    pub formatted: String,
}

/// Query `balanceOf(holder)` on the token at `token`.
///
/// Fails if no contract code is deployed at the token address.
pub async fn query_balance(
    rpc: &RpcClient,
    token: Address,
    holder: Address,
) -> Result<TokenBalance, DeployError> {
    let code = rpc.get_code(token).await?;
    if code == "0x" || code.is_empty() {
        return Err(DeployError::config(format!(
            "no contract deployed at address {token}"
        )));
    }

    let calldata = abi::encode_call(abi::BALANCE_OF_SIGNATURE, &[AbiValue::Address(holder)]);
    let ret = rpc.eth_call(token, &calldata).await?;
    let raw = decode_uint(&ret)?;

    Ok(TokenBalance {
        raw,
        formatted: units::format_units(raw, TOKEN_DECIMALS),
    })
}

/// Decode a single uint256 return word.
fn decode_uint(ret: &[u8]) -> Result<U256, DeployError> {
    if ret.len() < 32 {
        return Err(DeployError::network(format!(
            "balanceOf returned {} bytes, expected a 32-byte word",
            ret.len()
        )));
    }
    Ok(U256::from_be_slice(&ret[..32]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_uint() {
        let mut word = [0u8; 32];
        word[31] = 0x2a;
        assert_eq!(decode_uint(&word).unwrap(), U256::from(42u64));
        assert!(decode_uint(&[0u8; 4]).is_err());
        assert!(decode_uint(&[]).is_err());
    }

    #[test]
    fn test_formatted_balance() {
        let raw = units::ether(1) * U256::from(3) / U256::from(2);
        let balance = TokenBalance {
            raw,
            formatted: units::format_units(raw, TOKEN_DECIMALS),
        };
        assert_eq!(balance.formatted, "1.5");
    }
}

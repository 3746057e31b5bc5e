//! Minimal ABI encoding for the handful of calls the tool makes.
//!
//! Only static `uint256`/`address` arguments plus a single trailing dynamic
//! `bytes` argument are supported; that covers the proxy initializer, the
//! proxy constructor and `balanceOf`.

use alloy_core::primitives::{Address, U256, keccak256};

/// Signature of the UUPS initializer invoked through the proxy constructor.
///
/// Argument order: initial supply, owner, mining reward, mining difficulty,
/// staking APY, tax recipient, tax percent.
pub const INITIALIZE_SIGNATURE: &str =
    "initialize(uint256,address,uint256,uint256,uint256,address,uint256)";

/// Signature of the ERC-20 balance query.
pub const BALANCE_OF_SIGNATURE: &str = "balanceOf(address)";

/// A static ABI value occupying one 32-byte word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint(U256),
    Address(Address),
}

impl AbiValue {
    fn encode_word(&self, out: &mut Vec<u8>) {
        match self {
            AbiValue::Uint(value) => out.extend_from_slice(&value.to_be_bytes::<32>()),
            AbiValue::Address(addr) => {
                out.extend_from_slice(&[0u8; 12]);
                out.extend_from_slice(addr.as_slice());
            }
        }
    }
}

/// The 4-byte function selector for a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode a sequence of static values as head words.
pub fn encode_words(values: &[AbiValue]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 32);
    for value in values {
        value.encode_word(&mut out);
    }
    out
}

/// Encode a call with static arguments only: selector followed by head words.
pub fn encode_call(signature: &str, values: &[AbiValue]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + values.len() * 32);
    out.extend_from_slice(&selector(signature));
    out.extend_from_slice(&encode_words(values));
    out
}

/// Encode `(address, bytes)` constructor arguments for the ERC-1967 proxy.
///
/// Layout: address word, offset word (0x40), byte length word, then the data
/// right-padded to a 32-byte boundary.
pub fn encode_address_and_bytes(addr: Address, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(96 + data.len().next_multiple_of(32));
    AbiValue::Address(addr).encode_word(&mut out);
    AbiValue::Uint(U256::from(64u64)).encode_word(&mut out);
    AbiValue::Uint(U256::from(data.len() as u64)).encode_word(&mut out);
    out.extend_from_slice(data);
    let padding = data.len().next_multiple_of(32) - data.len();
    out.extend(std::iter::repeat_n(0u8, padding));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_selector_known_values() {
        assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(
            selector("transfer(address,uint256)"),
            [0xa9, 0x05, 0x9c, 0xbb]
        );
    }

    #[test]
    fn test_encode_balance_of() {
        let holder = Address::from_str("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap();
        let calldata = encode_call(BALANCE_OF_SIGNATURE, &[AbiValue::Address(holder)]);

        assert_eq!(calldata.len(), 4 + 32);
        assert_eq!(&calldata[..4], &[0x70, 0xa0, 0x82, 0x31]);
        // Address is right-aligned in its word.
        assert_eq!(&calldata[4..16], &[0u8; 12]);
        assert_eq!(&calldata[16..36], holder.as_slice());
    }

    #[test]
    fn test_encode_initializer_argument_order() {
        let owner = Address::from_str("0x0000000000000000000000000000000000000011").unwrap();
        let calldata = encode_call(
            INITIALIZE_SIGNATURE,
            &[
                AbiValue::Uint(U256::from(11_000_000_000u64)),
                AbiValue::Address(owner),
                AbiValue::Uint(U256::from(50u64)),
                AbiValue::Uint(U256::ZERO),
                AbiValue::Uint(U256::from(12u64)),
                AbiValue::Address(owner),
                AbiValue::Uint(U256::from(2u64)),
            ],
        );

        // Selector + seven head words.
        assert_eq!(calldata.len(), 4 + 7 * 32);
        // Supply in the first word.
        assert_eq!(
            U256::from_be_slice(&calldata[4..36]),
            U256::from(11_000_000_000u64)
        );
        // Tax percent in the last word.
        assert_eq!(
            U256::from_be_slice(&calldata[4 + 6 * 32..]),
            U256::from(2u64)
        );
    }

    #[test]
    fn test_encode_address_and_bytes_layout() {
        let impl_addr = Address::from_str("0x0000000000000000000000000000000000000001").unwrap();
        let init = vec![0xaa; 36];
        let encoded = encode_address_and_bytes(impl_addr, &init);

        // Three head/length words plus data padded to 64 bytes.
        assert_eq!(encoded.len(), 96 + 64);
        // Offset word points past the two head words.
        assert_eq!(U256::from_be_slice(&encoded[32..64]), U256::from(64u64));
        // Length word carries the unpadded size.
        assert_eq!(U256::from_be_slice(&encoded[64..96]), U256::from(36u64));
        // Data then zero padding.
        assert_eq!(&encoded[96..132], &init[..]);
        assert_eq!(&encoded[132..], &[0u8; 28]);
    }

    #[test]
    fn test_encode_address_and_bytes_exact_word() {
        // A 32-byte payload needs no padding.
        let addr = Address::ZERO;
        let encoded = encode_address_and_bytes(addr, &[0x01; 32]);
        assert_eq!(encoded.len(), 96 + 32);
    }
}

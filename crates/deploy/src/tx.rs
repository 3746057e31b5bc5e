//! Legacy transaction construction and EIP-155 signing.
//!
//! The deployment targets (BSC, Polygon, local hardhat nodes) all accept
//! pre-EIP-1559 transactions with an explicit gas price, which is exactly
//! what the gas-pricing policy produces, so only the legacy format is
//! implemented.

use alloy_core::primitives::{Address, B256, U256, keccak256};
use k256::ecdsa::SigningKey;

use crate::error::DeployError;

/// A legacy (type-0) transaction prior to signing.
#[derive(Debug, Clone)]
pub struct LegacyTransaction {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
}

impl LegacyTransaction {
    /// RLP payload of the unsigned transaction with the EIP-155 chain-id
    /// placeholder fields appended.
    fn rlp_unsigned(&self, chain_id: u64) -> Vec<u8> {
        let mut items = self.rlp_body();
        items.push(rlp::encode_u64(chain_id));
        items.push(rlp::encode_u64(0));
        items.push(rlp::encode_u64(0));
        rlp::encode_list(&items)
    }

    /// RLP encoding of the signed transaction, ready for
    /// `eth_sendRawTransaction`.
    fn rlp_signed(&self, v: u64, r: &[u8], s: &[u8]) -> Vec<u8> {
        let mut items = self.rlp_body();
        items.push(rlp::encode_u64(v));
        items.push(rlp::encode_bytes(rlp::trim_leading_zeros(r)));
        items.push(rlp::encode_bytes(rlp::trim_leading_zeros(s)));
        rlp::encode_list(&items)
    }

    fn rlp_body(&self) -> Vec<Vec<u8>> {
        vec![
            rlp::encode_u64(self.nonce),
            rlp::encode_u256(self.gas_price),
            rlp::encode_u64(self.gas_limit),
            match self.to {
                Some(addr) => rlp::encode_bytes(addr.as_slice()),
                None => rlp::encode_bytes(&[]),
            },
            rlp::encode_u256(self.value),
            rlp::encode_bytes(&self.data),
        ]
    }

    /// The EIP-155 signing hash.
    pub fn signing_hash(&self, chain_id: u64) -> B256 {
        keccak256(self.rlp_unsigned(chain_id))
    }
}

/// Local transaction signer holding a secp256k1 key.
#[derive(Clone)]
pub struct TxSigner {
    key: SigningKey,
    address: Address,
}

impl std::fmt::Debug for TxSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key material.
        f.debug_struct("TxSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl TxSigner {
    /// Create a signer from a 32-byte hex private key (with or without the
    /// `0x` prefix).
    pub fn from_hex(private_key_hex: &str) -> Result<Self, DeployError> {
        let private_key_hex = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);

        let private_key_bytes: [u8; 32] = hex::decode(private_key_hex)
            .map_err(|e| DeployError::config(format!("invalid private key hex: {e}")))?
            .try_into()
            .map_err(|_| DeployError::config("private key must be exactly 32 bytes"))?;

        let key = SigningKey::from_bytes(&private_key_bytes.into())
            .map_err(|e| DeployError::config(format!("invalid secp256k1 private key: {e}")))?;

        let address = derive_address(&key);
        Ok(Self { key, address })
    }

    /// The account address controlled by this key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a legacy transaction for the given chain and return the raw
    /// signed RLP bytes.
    pub fn sign_legacy(
        &self,
        tx: &LegacyTransaction,
        chain_id: u64,
    ) -> Result<Vec<u8>, DeployError> {
        let hash = tx.signing_hash(chain_id);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(hash.as_slice())
            .map_err(|e| DeployError::deployment(format!("failed to sign transaction: {e}")))?;

        let v = u64::from(recovery_id.to_byte()) + 35 + 2 * chain_id;
        let (r, s) = signature.split_bytes();
        Ok(tx.rlp_signed(v, r.as_slice(), s.as_slice()))
    }
}

/// Derive the account address from a signing key: keccak of the uncompressed
/// public key (without the 0x04 marker), last 20 bytes.
fn derive_address(key: &SigningKey) -> Address {
    let public_key_point = key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&public_key_point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// The address a CREATE deployment from `sender` with `nonce` will land at:
/// keccak of `rlp([sender, nonce])`, last 20 bytes.
pub fn create_address(sender: Address, nonce: u64) -> Address {
    let encoded = rlp::encode_list(&[
        rlp::encode_bytes(sender.as_slice()),
        rlp::encode_u64(nonce),
    ]);
    let hash = keccak256(encoded);
    Address::from_slice(&hash[12..])
}

/// Minimal RLP encoder, enough for legacy transactions.
mod rlp {
    use alloy_core::primitives::U256;

    /// Encode a byte string.
    pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
        if bytes.len() == 1 && bytes[0] < 0x80 {
            return bytes.to_vec();
        }
        let mut out = length_prefix(bytes.len(), 0x80);
        out.extend_from_slice(bytes);
        out
    }

    /// Encode a list of already-encoded items.
    pub fn encode_list(items: &[Vec<u8>]) -> Vec<u8> {
        let payload_len: usize = items.iter().map(Vec::len).sum();
        let mut out = length_prefix(payload_len, 0xc0);
        for item in items {
            out.extend_from_slice(item);
        }
        out
    }

    /// Encode a u64 scalar (minimal big-endian, zero is the empty string).
    pub fn encode_u64(value: u64) -> Vec<u8> {
        encode_bytes(trim_leading_zeros(&value.to_be_bytes()))
    }

    /// Encode a U256 scalar.
    pub fn encode_u256(value: U256) -> Vec<u8> {
        encode_bytes(&value.to_be_bytes_trimmed_vec())
    }

    pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
        let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        &bytes[start..]
    }

    fn length_prefix(len: usize, offset: u8) -> Vec<u8> {
        if len < 56 {
            vec![offset + len as u8]
        } else {
            let len_bytes = trim_leading_zeros(&(len as u64).to_be_bytes()).to_vec();
            let mut out = vec![offset + 55 + len_bytes.len() as u8];
            out.extend_from_slice(&len_bytes);
            out
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_encode_bytes_vectors() {
            // Canonical RLP vectors.
            assert_eq!(encode_bytes(&[]), vec![0x80]);
            assert_eq!(encode_bytes(b"dog"), vec![0x83, b'd', b'o', b'g']);
            assert_eq!(encode_bytes(&[0x00]), vec![0x00]);
            assert_eq!(encode_bytes(&[0x7f]), vec![0x7f]);
            assert_eq!(encode_bytes(&[0x80]), vec![0x81, 0x80]);
        }

        #[test]
        fn test_encode_scalars() {
            assert_eq!(encode_u64(0), vec![0x80]);
            assert_eq!(encode_u64(15), vec![0x0f]);
            assert_eq!(encode_u64(1024), vec![0x82, 0x04, 0x00]);
            assert_eq!(encode_u256(U256::from(1024u64)), vec![0x82, 0x04, 0x00]);
        }

        #[test]
        fn test_encode_list_vectors() {
            let cat_dog = encode_list(&[encode_bytes(b"cat"), encode_bytes(b"dog")]);
            assert_eq!(
                cat_dog,
                vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
            );
            assert_eq!(encode_list(&[]), vec![0xc0]);
        }

        #[test]
        fn test_long_string_prefix() {
            let long = vec![0xab; 60];
            let encoded = encode_bytes(&long);
            assert_eq!(encoded[0], 0xb8);
            assert_eq!(encoded[1], 60);
            assert_eq!(encoded.len(), 62);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // The EIP-155 reference transaction: nonce 9, 20 gwei gas price, 21000
    // gas, 1 ether to 0x3535...35, signed on chain 1 with the key 0x4646...46.
    fn eip155_example() -> (TxSigner, LegacyTransaction) {
        let signer = TxSigner::from_hex(
            "0x4646464646464646464646464646464646464646464646464646464646464646",
        )
        .unwrap();
        let tx = LegacyTransaction {
            nonce: 9,
            gas_price: U256::from(20_000_000_000u64),
            gas_limit: 21_000,
            to: Some(Address::from_str("0x3535353535353535353535353535353535353535").unwrap()),
            value: U256::from(10u64).pow(U256::from(18)),
            data: vec![],
        };
        (signer, tx)
    }

    #[test]
    fn test_eip155_signing_hash() {
        let (_, tx) = eip155_example();
        assert_eq!(
            hex::encode(tx.signing_hash(1)),
            "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
        );
    }

    #[test]
    fn test_eip155_signed_raw_transaction() {
        let (signer, tx) = eip155_example();
        let raw = signer.sign_legacy(&tx, 1).unwrap();
        assert_eq!(
            hex::encode(raw),
            "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6\
             b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa\
             636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        );
    }

    #[test]
    fn test_signer_address_derivation() {
        // Address of the EIP-155 example key.
        let (signer, _) = eip155_example();
        assert_eq!(
            signer.address(),
            Address::from_str("0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F").unwrap()
        );
    }

    #[test]
    fn test_create_address_known_vectors() {
        let sender = Address::from_str("0x6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0").unwrap();
        assert_eq!(
            create_address(sender, 0),
            Address::from_str("0xcd234a471b72ba2f1ccf0a70fcaba648a5eecd8d").unwrap()
        );
        assert_eq!(
            create_address(sender, 1),
            Address::from_str("0x343c43a37d37dff08ae8c4a11544c718abb4fcf8").unwrap()
        );
    }

    #[test]
    fn test_invalid_private_keys_rejected() {
        assert!(matches!(
            TxSigner::from_hex("0x1234"),
            Err(DeployError::Config(_))
        ));
        assert!(matches!(
            TxSigner::from_hex("not-hex-at-all"),
            Err(DeployError::Config(_))
        ));
    }
}

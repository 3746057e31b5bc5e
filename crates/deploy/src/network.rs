//! Target network table.
//!
//! Mirrors the networks the token is deployed to in practice: the BSC and
//! Polygon chains plus the two local development networks. A custom network
//! is selected by passing its RPC URL directly.

use serde::{Deserialize, Serialize};

/// A deployment target network.
///
/// Parsed from kebab-case names (`bsc-testnet`, `polygon-amoy`, ...); any
/// unrecognized value is treated as a custom RPC URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[derive(Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "kebab-case")]
pub enum Network {
    Localhost,
    Hardhat,
    BscTestnet,
    Bsc,
    PolygonAmoy,
    Polygon,
    #[strum(default)]
    Custom(String),
}

impl Network {
    /// The chain ID, if the network is a known one.
    ///
    /// Custom networks report `None`; the chain ID is then queried from the
    /// node itself before signing.
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Network::Localhost | Network::Hardhat => Some(31337),
            Network::BscTestnet => Some(97),
            Network::Bsc => Some(56),
            Network::PolygonAmoy => Some(80002),
            Network::Polygon => Some(137),
            Network::Custom(_) => None,
        }
    }

    /// The default RPC endpoint for the network.
    pub fn default_rpc_url(&self) -> &str {
        match self {
            Network::Localhost | Network::Hardhat => "http://127.0.0.1:8545",
            Network::BscTestnet => "https://data-seed-prebsc-1-s1.binance.org:8545",
            Network::Bsc => "https://bsc-dataseed1.binance.org",
            Network::PolygonAmoy => "https://rpc-amoy.polygon.technology",
            Network::Polygon => "https://polygon-rpc.com",
            Network::Custom(url) => url,
        }
    }

    /// The ticker of the native currency used for fee reporting.
    ///
    /// This is only a display default; the resolved configuration carries the
    /// symbol as a plain value and may override it.
    pub fn currency_symbol(&self) -> &'static str {
        match self {
            Network::Localhost | Network::Hardhat | Network::Custom(_) => "ETH",
            Network::BscTestnet => "tBNB",
            Network::Bsc => "BNB",
            Network::PolygonAmoy | Network::Polygon => "POL",
        }
    }

    /// Whether this is a local development network.
    ///
    /// Local networks skip gas-price discovery entirely and always use the
    /// fixed nominal price.
    pub fn is_local(&self) -> bool {
        matches!(self, Network::Localhost | Network::Hardhat)
    }
}

impl From<Network> for String {
    fn from(network: Network) -> Self {
        network.to_string()
    }
}

impl From<String> for Network {
    fn from(s: String) -> Self {
        // EnumString with a default variant never fails to parse.
        s.parse().unwrap_or(Network::Custom(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chain_ids() {
        assert_eq!(Network::Localhost.chain_id(), Some(31337));
        assert_eq!(Network::Hardhat.chain_id(), Some(31337));
        assert_eq!(Network::BscTestnet.chain_id(), Some(97));
        assert_eq!(Network::Bsc.chain_id(), Some(56));
        assert_eq!(Network::PolygonAmoy.chain_id(), Some(80002));
        assert_eq!(Network::Polygon.chain_id(), Some(137));
    }

    #[test]
    fn test_parse_kebab_case() {
        assert_eq!("localhost".parse::<Network>().unwrap(), Network::Localhost);
        assert_eq!("bsc-testnet".parse::<Network>().unwrap(), Network::BscTestnet);
        assert_eq!("polygon-amoy".parse::<Network>().unwrap(), Network::PolygonAmoy);
    }

    #[test]
    fn test_unknown_name_becomes_custom() {
        let network: Network = "https://rpc.example.org".parse().unwrap();
        assert_eq!(
            network,
            Network::Custom("https://rpc.example.org".to_string())
        );
        assert_eq!(network.chain_id(), None);
        assert_eq!(network.default_rpc_url(), "https://rpc.example.org");
    }

    #[test]
    fn test_local_networks() {
        assert!(Network::Localhost.is_local());
        assert!(Network::Hardhat.is_local());
        assert!(!Network::Bsc.is_local());
        assert!(!Network::Custom("http://10.0.0.1:8545".into()).is_local());
    }
}

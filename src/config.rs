// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Network configuration for the RNS contracts on Rootstock
//!
//! Contract addresses come from the official RNS suite documentation. They
//! live in one table keyed by role and network, and are injected into the
//! collaborators instead of being re-declared per call site.

use crate::error::{Result, RnsError};
use ethers::types::Address;
use std::env;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 30,
            Network::Testnet => 31,
        }
    }

    /// Environment variable holding the RPC API key for this network.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Network::Mainnet => "RSK_MAINNET_API_KEY",
            Network::Testnet => "RSK_TESTNET_API_KEY",
        }
    }

    pub fn rpc_url(self, api_key: &str) -> String {
        match self {
            Network::Mainnet => format!("https://rpc.rootstock.io/{api_key}"),
            Network::Testnet => format!("https://rpc.testnet.rootstock.io/{api_key}"),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(format!(
                "unknown network '{other}' (expected mainnet or testnet)"
            )),
        }
    }
}

/// Role a contract plays in the RNS suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractRole {
    /// ERC-721 node owner (a.k.a. rskOwner): availability, ownership, transfer
    RskOwner,
    /// FIFS addr registrar: price, commitments, registration target
    FifsAddrRegistrar,
    /// ERC-677 RIF payment token
    RifToken,
    /// RNS registry: owner and resolver records per node
    Registry,
    /// Renewal contract, paid through transferAndCall
    Renewer,
}

/// Official RNS contract address for a role on a network.
pub fn contract_address(role: ContractRole, network: Network) -> Result<Address> {
    use ContractRole::*;
    use Network::*;

    let addr = match (role, network) {
        (RskOwner, Mainnet) => "0x45d3e4fb311982a06ba52359d44cb4f5980e0ef1",
        (RskOwner, Testnet) => "0xca0a477e19bac7e0e172ccfd2e3c28a7200bdb71",
        (FifsAddrRegistrar, Mainnet) => "0xd9c79ced86ecf49f5e4a973594634c83197c35ab",
        (FifsAddrRegistrar, Testnet) => "0x90734bd6bf96250a7b262e2bc34284b0d47c1e8d",
        (RifToken, Mainnet) => "0x2acc95758f8b5f583470ba265eb685a8f45fc1d5",
        (RifToken, Testnet) => "0x19f64674d8a5b4e652319f5e239efd3bc969a1fe",
        (Registry, Mainnet) => "0xcb868aeabd31e2b66f74e9a55cf064abb31a4ad5",
        (Registry, Testnet) => "0x7d284aaac6e925aad802a53c0c69efe3764597b8",
        (Renewer, Mainnet) => "0x7a9872a7615c475b62a62b8f6e491077fb05f663",
        (Renewer, Testnet) => "0xe48ad1d5fbf61394b5a7d81ab2f36736a046657b",
    };

    addr.parse::<Address>()
        .map_err(|_| RnsError::InvalidAddress(addr.to_string()))
}

/// Process configuration, resolved from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub network: Network,
    pub rpc_url: String,
    private_key: Option<String>,
}

impl Config {
    /// Read configuration for `network` from the environment.
    ///
    /// The RPC API key is required for every command; the signing key is
    /// only required for write operations and is validated lazily through
    /// [`Config::private_key`].
    pub fn from_env(network: Network) -> Result<Self> {
        let api_key = env::var(network.api_key_var())
            .map_err(|_| RnsError::MissingCredential(network.api_key_var()))?;

        Ok(Config {
            network,
            rpc_url: network.rpc_url(&api_key),
            private_key: env::var("PRIVATE_KEY").ok(),
        })
    }

    /// Signing key for write operations. Fails before any network call if
    /// `PRIVATE_KEY` is absent.
    pub fn private_key(&self) -> Result<&str> {
        self.private_key
            .as_deref()
            .ok_or(RnsError::MissingCredential("PRIVATE_KEY"))
    }

    #[cfg(test)]
    pub fn for_tests(network: Network, private_key: Option<&str>) -> Self {
        Config {
            network,
            rpc_url: "http://localhost:4444".to_string(),
            private_key: private_key.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_round_trips_through_str() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::Testnet);
        assert!("regtest".parse::<Network>().is_err());
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
    }

    #[test]
    fn chain_ids_match_rootstock() {
        assert_eq!(Network::Mainnet.chain_id(), 30);
        assert_eq!(Network::Testnet.chain_id(), 31);
    }

    #[test]
    fn every_role_has_an_address_on_both_networks() {
        for role in [
            ContractRole::RskOwner,
            ContractRole::FifsAddrRegistrar,
            ContractRole::RifToken,
            ContractRole::Registry,
            ContractRole::Renewer,
        ] {
            for network in [Network::Mainnet, Network::Testnet] {
                contract_address(role, network).unwrap();
            }
        }
    }

    #[test]
    fn missing_private_key_is_a_credential_error() {
        let config = Config::for_tests(Network::Testnet, None);
        assert!(matches!(
            config.private_key(),
            Err(RnsError::MissingCredential("PRIVATE_KEY"))
        ));
    }
}

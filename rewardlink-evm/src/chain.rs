//! EVM chain primitives.
//!
//! Chain identifiers and the per-network deployment record of the
//! RewardLink contracts.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// An EIP-155 chain ID (e.g., 10143 for Monad Testnet, 11155111 for Sepolia).
pub type ChainId = u64;

/// A token deployment on an EVM network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDeployment {
    /// Contract address.
    pub address: Address,
    /// Number of decimals (18 for the reward token).
    pub decimals: u8,
}

/// RewardLink deployment on a known network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Human-readable network name.
    pub name: String,
    /// EIP-155 chain ID.
    pub chain_id: ChainId,
    /// Default public RPC endpoint.
    pub rpc_url: String,
    /// Reward token accepted in links, if deployed.
    pub token: Option<TokenDeployment>,
    /// `RewardLinkExecutor` contract, if deployed.
    pub executor: Option<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_config_json() {
        let config = NetworkConfig {
            name: "Local".to_owned(),
            chain_id: 31_337,
            rpc_url: "http://127.0.0.1:8545".to_owned(),
            token: None,
            executor: Some(Address::ZERO),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["chainId"], 31_337);
        assert_eq!(json["rpcUrl"], "http://127.0.0.1:8545");
        assert!(json["token"].is_null());
        let back: NetworkConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}

//! Known EVM networks and RewardLink deployments.

use alloy_primitives::{Address, address};

use crate::chain::{ChainId, NetworkConfig, TokenDeployment};

/// Monad Testnet chain ID.
pub const MONAD_TESTNET: ChainId = 10143;

/// Ethereum Sepolia (testnet) chain ID.
pub const SEPOLIA: ChainId = 11_155_111;

/// Default RPC endpoint for Monad Testnet.
pub const MONAD_TESTNET_RPC: &str = "https://testnet-rpc.monad.xyz";

/// Reward token (`XToken`) on Monad Testnet.
pub const XTOKEN_MONAD_TESTNET: Address = address!("151310CEAC3686C08c83E423a7E5Bf4EC04b3bD3");

/// Decimals of the reward token.
pub const XTOKEN_DECIMALS: u8 = 18;

/// Returns the networks the platform ships with.
///
/// The executor address is not pinned for any network; it is supplied by the
/// operator at run time.
#[must_use]
pub fn known_networks() -> Vec<NetworkConfig> {
    vec![
        NetworkConfig {
            name: "Monad Testnet".to_owned(),
            chain_id: MONAD_TESTNET,
            rpc_url: MONAD_TESTNET_RPC.to_owned(),
            token: Some(TokenDeployment {
                address: XTOKEN_MONAD_TESTNET,
                decimals: XTOKEN_DECIMALS,
            }),
            executor: None,
        },
        NetworkConfig {
            name: "Sepolia".to_owned(),
            chain_id: SEPOLIA,
            rpc_url: "https://rpc.sepolia.org".to_owned(),
            token: None,
            executor: None,
        },
    ]
}

/// Looks up a known network by chain ID.
#[must_use]
pub fn network_by_chain_id(chain_id: ChainId) -> Option<NetworkConfig> {
    known_networks().into_iter().find(|n| n.chain_id == chain_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monad_testnet_has_token() {
        let monad = network_by_chain_id(MONAD_TESTNET).unwrap();
        assert_eq!(monad.chain_id, 10143);
        assert_eq!(monad.token.unwrap().decimals, 18);
    }

    #[test]
    fn test_unknown_chain() {
        assert!(network_by_chain_id(1).is_none());
    }
}

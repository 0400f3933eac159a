//! EIP-712 definitions for the `PaymentLink` message.
//!
//! The domain name/version and the struct layout are hashed by the
//! `RewardLinkExecutor` contract. Any change here invalidates every signature
//! the contract would otherwise accept.

use alloy_sol_types::sol;
use serde::{Deserialize, Serialize};

/// EIP-712 domain name hashed by the verifying contract.
pub const DOMAIN_NAME: &str = "RewardLinkExecutor";

/// EIP-712 domain version hashed by the verifying contract.
pub const DOMAIN_VERSION: &str = "1";

/// Name of the primary EIP-712 type.
pub const PRIMARY_TYPE: &str = "PaymentLink";

/// One member of an EIP-712 struct type, as it appears in a `types` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypedDataField {
    /// Member name.
    pub name: &'static str,
    /// Solidity type of the member.
    #[serde(rename = "type")]
    pub ty: &'static str,
}

/// Members of `PaymentLink`, in hashing order.
pub const PAYMENT_LINK_FIELDS: [TypedDataField; 6] = [
    TypedDataField {
        name: "token",
        ty: "address",
    },
    TypedDataField {
        name: "sender",
        ty: "address",
    },
    TypedDataField {
        name: "recipients",
        ty: "address[]",
    },
    TypedDataField {
        name: "amounts",
        ty: "uint256[]",
    },
    TypedDataField {
        name: "nonce",
        ty: "uint256",
    },
    TypedDataField {
        name: "expiry",
        ty: "uint256",
    },
];

sol!(
    /// Solidity-compatible `PaymentLink` struct signed by the sender.
    ///
    /// Field order MUST match the struct hashed by `RewardLinkExecutor`.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct PaymentLink {
        address token;
        address sender;
        address[] recipients;
        uint256[] amounts;
        uint256 nonce;
        uint256 expiry;
    }
);

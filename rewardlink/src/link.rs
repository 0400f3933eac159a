//! The payment-link payload.

use serde::{Deserialize, Serialize};

use crate::timestamp::UnixTimestamp;

/// A proposed batch token transfer, as carried by a payment link.
///
/// Addresses and amounts are kept as the text that travelled in the URL. The
/// codec does not check them; they are coerced into `address`/`uint256`
/// values only when the EIP-712 signing request is built.
///
/// `recipients[i]` receives `amounts[i]`; both lists have the same length and
/// are never empty in a value produced by [`decode`](crate::encoding::decode).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkData {
    /// ERC-20 token to transfer.
    pub token: String,
    /// Wallet expected to sign the authorization.
    pub sender: String,
    /// Transfer destinations, in order.
    pub recipients: Vec<String>,
    /// Amounts in the token's smallest unit, as decimal strings.
    pub amounts: Vec<String>,
    /// Anti-replay counter checked by the verifying contract.
    pub nonce: u64,
    /// The link is unusable once the current time is past this instant.
    pub expiry: UnixTimestamp,
}

impl PaymentLinkData {
    /// Returns `true` when recipients and amounts are non-empty and parallel.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.recipients.is_empty() && self.recipients.len() == self.amounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PaymentLinkData {
        PaymentLinkData {
            token: "0xaaa".into(),
            sender: "0xbbb".into(),
            recipients: vec!["0xccc".into(), "0xddd".into()],
            amounts: vec!["10".into(), "20".into()],
            nonce: 1,
            expiry: UnixTimestamp::from_secs(99),
        }
    }

    #[test]
    fn test_json_uses_camel_case_and_numbers() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["nonce"], 1);
        assert_eq!(json["expiry"], 99);
        assert_eq!(json["recipients"][1], "0xddd");
    }

    #[test]
    fn test_well_formed() {
        let mut data = sample();
        assert!(data.is_well_formed());
        data.amounts.pop();
        assert!(!data.is_well_formed());
        data.recipients.clear();
        data.amounts.clear();
        assert!(!data.is_well_formed());
    }
}

//! Construction of the EIP-712 signing request for a payment link.
//!
//! [`build_typed_data_request`] turns a decoded [`PaymentLinkData`] into the
//! `{domain, types, primaryType, message}` object a wallet signs. This is
//! the last step before a cryptographic commitment, so every address and
//! amount is coerced strictly and any defect is an error.

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct, eip712_domain};
use rewardlink::PaymentLinkData;
use rewardlink::amount::parse_amount;
use serde::{Deserialize, Serialize};

use super::types::{
    DOMAIN_NAME, DOMAIN_VERSION, PAYMENT_LINK_FIELDS, PRIMARY_TYPE, PaymentLink, TypedDataField,
};
use crate::chain::ChainId;

/// Errors from coercing link data into EIP-712 values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypedDataError {
    /// An address field does not hold a 20-byte hex address.
    #[error("invalid address in {field}: {value:?}")]
    InvalidAddress {
        /// Field name, with index for list members (e.g. `recipients[1]`).
        field: String,
        /// The offending text.
        value: String,
    },

    /// An amount is not a base-10 integer that fits in `uint256`.
    #[error("amount #{index} is not a valid uint256: {value:?}")]
    InvalidAmount {
        /// Position of the amount in the link.
        index: usize,
        /// The offending text.
        value: String,
    },

    /// `recipients` and `amounts` are not parallel lists.
    #[error("{recipients} recipients but {amounts} amounts")]
    LengthMismatch {
        /// Number of recipients.
        recipients: usize,
        /// Number of amounts.
        amounts: usize,
    },
}

/// The `domain` part of the signing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    /// Always [`DOMAIN_NAME`].
    pub name: String,
    /// Always [`DOMAIN_VERSION`].
    pub version: String,
    /// Chain the signature is valid on.
    pub chain_id: ChainId,
    /// Contract that checks the signature.
    pub verifying_contract: Address,
}

impl TypedDataDomain {
    /// The pinned RewardLink domain for a chain and executor.
    #[must_use]
    pub fn new(chain_id: ChainId, verifying_contract: Address) -> Self {
        Self {
            name: DOMAIN_NAME.to_owned(),
            version: DOMAIN_VERSION.to_owned(),
            chain_id,
            verifying_contract,
        }
    }

    /// Converts into alloy's domain type for hashing.
    #[must_use]
    pub fn to_eip712(&self) -> Eip712Domain {
        eip712_domain! {
            name: self.name.clone(),
            version: self.version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.verifying_contract,
        }
    }
}

/// The `types` part of the signing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypedDataTypes {
    /// Members of the `PaymentLink` struct, in hashing order.
    #[serde(rename = "PaymentLink")]
    pub payment_link: &'static [TypedDataField],
}

impl Default for TypedDataTypes {
    fn default() -> Self {
        Self {
            payment_link: &PAYMENT_LINK_FIELDS,
        }
    }
}

/// An EIP-712 signing request for a payment link.
///
/// Serializes to the JSON object accepted by `eth_signTypedData_v4`-style
/// wallet APIs, minus the implicit `EIP712Domain` type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataRequest {
    /// Domain separator inputs.
    pub domain: TypedDataDomain,
    /// Struct definitions.
    pub types: TypedDataTypes,
    /// Always [`PRIMARY_TYPE`].
    pub primary_type: &'static str,
    /// The typed message.
    pub message: PaymentLink,
}

impl TypedDataRequest {
    /// Computes the EIP-712 digest a wallet signs for this request.
    #[must_use]
    pub fn signing_hash(&self) -> B256 {
        self.message.eip712_signing_hash(&self.domain.to_eip712())
    }

    /// Address expected to produce the signature.
    #[must_use]
    pub const fn sender(&self) -> Address {
        self.message.sender
    }
}

/// Builds the signing request for `data` on `chain_id`, verified by
/// `verifying_contract`.
///
/// # Errors
///
/// Returns [`TypedDataError`] if an address does not parse, an amount is
/// not a base-10 `uint256`, or the lists are not parallel.
pub fn build_typed_data_request(
    chain_id: ChainId,
    verifying_contract: Address,
    data: &PaymentLinkData,
) -> Result<TypedDataRequest, TypedDataError> {
    if data.recipients.len() != data.amounts.len() {
        return Err(TypedDataError::LengthMismatch {
            recipients: data.recipients.len(),
            amounts: data.amounts.len(),
        });
    }

    let token = parse_address("token", &data.token)?;
    let sender = parse_address("sender", &data.sender)?;
    let recipients = data
        .recipients
        .iter()
        .enumerate()
        .map(|(i, r)| parse_address(&format!("recipients[{i}]"), r))
        .collect::<Result<Vec<_>, _>>()?;
    let amounts = data
        .amounts
        .iter()
        .enumerate()
        .map(|(index, a)| {
            parse_amount(a).map_err(|_| TypedDataError::InvalidAmount {
                index,
                value: a.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Values here MUST mirror the link exactly: the executor rebuilds this
    // struct from its call arguments to check the signature.
    let message = PaymentLink {
        token,
        sender,
        recipients,
        amounts,
        nonce: U256::from(data.nonce),
        expiry: U256::from(data.expiry.as_secs()),
    };

    Ok(TypedDataRequest {
        domain: TypedDataDomain::new(chain_id, verifying_contract),
        types: TypedDataTypes::default(),
        primary_type: PRIMARY_TYPE,
        message,
    })
}

fn parse_address(field: &str, value: &str) -> Result<Address, TypedDataError> {
    value
        .parse::<Address>()
        .map_err(|_| TypedDataError::InvalidAddress {
            field: field.to_owned(),
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use rewardlink::UnixTimestamp;

    use super::*;

    const EXECUTOR: Address = address!("0xABC0000000000000000000000000000000000abc");

    fn scenario() -> PaymentLinkData {
        PaymentLinkData {
            token: "0xAAA0000000000000000000000000000000000001".into(),
            sender: "0xBBB0000000000000000000000000000000000002".into(),
            recipients: vec![
                "0xCCC0000000000000000000000000000000000003".into(),
                "0xDDD0000000000000000000000000000000000004".into(),
            ],
            amounts: vec![
                "1000000000000000000".into(),
                "2000000000000000000".into(),
            ],
            nonce: 5,
            expiry: UnixTimestamp::from_secs(1_999_999_999),
        }
    }

    #[test]
    fn test_domain_is_pinned() {
        for (chain_id, contract) in [(1337, EXECUTOR), (1, Address::ZERO), (10143, EXECUTOR)] {
            let request = build_typed_data_request(chain_id, contract, &scenario()).unwrap();
            assert_eq!(request.domain.name, "RewardLinkExecutor");
            assert_eq!(request.domain.version, "1");
            assert_eq!(request.domain.chain_id, chain_id);
            assert_eq!(request.domain.verifying_contract, contract);
        }
    }

    #[test]
    fn test_message_is_typed() {
        let request = build_typed_data_request(1337, EXECUTOR, &scenario()).unwrap();
        let m = &request.message;
        assert_eq!(m.token, address!("0xAAA0000000000000000000000000000000000001"));
        assert_eq!(m.recipients.len(), 2);
        assert_eq!(m.amounts[1], U256::from(2_000_000_000_000_000_000u128));
        assert_eq!(m.nonce, U256::from(5u8));
        assert_eq!(m.expiry, U256::from(1_999_999_999u64));
        assert_eq!(request.primary_type, "PaymentLink");
    }

    #[test]
    fn test_json_field_order_is_fixed() {
        let request = build_typed_data_request(1337, EXECUTOR, &scenario()).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        let names: Vec<&str> = json["types"]["PaymentLink"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["token", "sender", "recipients", "amounts", "nonce", "expiry"]
        );
        assert_eq!(json["types"]["PaymentLink"][3]["type"], "uint256[]");
        assert_eq!(json["primaryType"], "PaymentLink");
        assert_eq!(json["domain"]["chainId"], 1337);
    }

    #[test]
    fn test_hash_ignores_address_case() {
        let lower = {
            let mut d = scenario();
            d.token = d.token.to_lowercase();
            d.sender = d.sender.to_lowercase();
            d
        };
        let a = build_typed_data_request(1337, EXECUTOR, &scenario()).unwrap();
        let b = build_typed_data_request(1337, EXECUTOR, &lower).unwrap();
        assert_eq!(a.signing_hash(), b.signing_hash());
    }

    #[test]
    fn test_hash_depends_on_chain_and_contract() {
        let data = scenario();
        let base = build_typed_data_request(1337, EXECUTOR, &data).unwrap();
        let other_chain = build_typed_data_request(1338, EXECUTOR, &data).unwrap();
        let other_contract = build_typed_data_request(1337, Address::ZERO, &data).unwrap();
        assert_ne!(base.signing_hash(), other_chain.signing_hash());
        assert_ne!(base.signing_hash(), other_contract.signing_hash());
    }

    #[test]
    fn test_hash_depends_on_recipient_order() {
        let mut swapped = scenario();
        swapped.recipients.swap(0, 1);
        let a = build_typed_data_request(1337, EXECUTOR, &scenario()).unwrap();
        let b = build_typed_data_request(1337, EXECUTOR, &swapped).unwrap();
        assert_ne!(a.signing_hash(), b.signing_hash());
    }

    #[test]
    fn test_malformed_amount_fails_loudly() {
        let mut data = scenario();
        data.amounts[1] = "2.5".into();
        let err = build_typed_data_request(1337, EXECUTOR, &data).unwrap_err();
        assert_eq!(
            err,
            TypedDataError::InvalidAmount {
                index: 1,
                value: "2.5".into(),
            }
        );
    }

    #[test]
    fn test_oversized_amount_fails() {
        let mut data = scenario();
        data.amounts[0] = format!("{}0", U256::MAX);
        assert!(matches!(
            build_typed_data_request(1337, EXECUTOR, &data),
            Err(TypedDataError::InvalidAmount { index: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_recipient_names_its_position() {
        let mut data = scenario();
        data.recipients[1] = "0xDDD".into();
        let err = build_typed_data_request(1337, EXECUTOR, &data).unwrap_err();
        assert!(matches!(
            err,
            TypedDataError::InvalidAddress { ref field, .. } if field == "recipients[1]"
        ));
    }

    #[test]
    fn test_length_mismatch_fails() {
        let mut data = scenario();
        data.amounts.pop();
        assert_eq!(
            build_typed_data_request(1337, EXECUTOR, &data).unwrap_err(),
            TypedDataError::LengthMismatch {
                recipients: 2,
                amounts: 1,
            }
        );
    }
}

//! EIP-712 payment links for the `RewardLinkExecutor` contract.
//!
//! A link decoded by [`rewardlink::encoding`] turns into a
//! [`TypedDataRequest`] with [`build_typed_data_request`]. The sender signs
//! it ([`client`], behind the `client` feature) and anyone holding the
//! [`SignedPaymentLink`] can submit it ([`executor`], behind the `executor`
//! feature).

pub mod signature;
pub mod typed_data;
pub mod types;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "executor")]
pub mod executor;

pub use signature::{SignatureError, SignedPaymentLink, recover_signer, verify_signature};
pub use typed_data::{
    TypedDataDomain, TypedDataError, TypedDataRequest, TypedDataTypes, build_typed_data_request,
};
pub use types::{DOMAIN_NAME, DOMAIN_VERSION, PAYMENT_LINK_FIELDS, PRIMARY_TYPE, PaymentLink};

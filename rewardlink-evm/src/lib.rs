#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM support for `RewardLink` payment links.
//!
//! Turns the string-typed [`rewardlink::PaymentLinkData`] carried in a link
//! URL into an EIP-712 signing request for the `RewardLinkExecutor`
//! contract, recovers and checks signatures over it, and submits signed
//! links on-chain.
//!
//! # Architecture
//!
//! - [`chain`] - Chain identifiers and per-network deployment configuration
//! - [`link`] - Typed-data requests, signatures, signing and execution
//! - [`networks`] - Built-in network table
//!
//! # Feature Flags
//!
//! - `client` - Sender-side signing with a local private key
//! - `executor` - Contract bindings and on-chain submission
//! - `telemetry` - `tracing` spans and events
//!
//! # Example
//!
//! ```
//! use alloy_primitives::address;
//! use rewardlink::encoding::decode_url;
//! use rewardlink_evm::link::build_typed_data_request;
//!
//! let url = "https://pay.example/approve-payment?token=0x151310CEAC3686C08c83E423a7E5Bf4EC04b3bD3\
//!     &sender=0x00000000000000000000000000000000000000b0\
//!     &recipients=0x00000000000000000000000000000000000000c1\
//!     &amounts=1000&nonce=0&expiry=1700000000";
//! let data = decode_url(url).expect("valid link");
//! let executor = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
//! let request = build_typed_data_request(10143, executor, &data).expect("well-formed link");
//! assert_eq!(request.primary_type, "PaymentLink");
//! ```

pub mod chain;
pub mod link;
pub mod networks;

pub use chain::{ChainId, NetworkConfig, TokenDeployment};
pub use link::{SignedPaymentLink, TypedDataRequest, build_typed_data_request};

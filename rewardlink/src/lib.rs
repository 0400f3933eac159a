#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for RewardLink payment links.
//!
//! A payment link lets a wallet pre-authorize a batch ERC-20 transfer. The
//! transfer parameters travel in a URL; the sender signs them as EIP-712
//! typed data and anyone holding the signature can later execute the batch
//! through the `RewardLinkExecutor` contract.
//!
//! This crate is chain-agnostic and holds no state. The EIP-712 message,
//! signing and contract bindings live in `rewardlink-evm`.
//!
//! # Modules
//!
//! - [`link`] - The [`PaymentLinkData`] payload
//! - [`encoding`] - Query-string encode/decode and link URL generation
//! - [`approval`] - Sender, expiry and balance checks run before signing
//! - [`amount`] - Strict `uint256` amount parsing and display formatting
//! - [`format`] - Abbreviated addresses and transaction hashes
//! - [`timestamp`] - [`UnixTimestamp`] used for link expiry
//! - [`error`] - Error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Emits `tracing` events when a link is rejected
//!
//! # Example
//!
//! ```rust
//! use rewardlink::encoding::{decode_url, generate_link_url};
//! use rewardlink::{PaymentLinkData, UnixTimestamp};
//!
//! let link = PaymentLinkData {
//!     token: "0x151310CEAC3686C08c83E423a7E5Bf4EC04b3bD3".into(),
//!     sender: "0x00000000000000000000000000000000000000b0".into(),
//!     recipients: vec!["0x00000000000000000000000000000000000000c1".into()],
//!     amounts: vec!["1000000000000000000".into()],
//!     nonce: 0,
//!     expiry: UnixTimestamp::from_secs(1_999_999_999),
//! };
//! let url = generate_link_url("https://rewards.example", &link);
//! assert_eq!(decode_url(&url), Some(link));
//! ```

pub mod amount;
pub mod approval;
pub mod encoding;
pub mod error;
pub mod format;
pub mod link;
pub mod timestamp;

pub use error::{ApprovalError, ParseDecimalError};
pub use link::PaymentLinkData;
pub use timestamp::UnixTimestamp;

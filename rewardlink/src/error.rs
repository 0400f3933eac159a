//! Error types for payment-link handling.
//!
//! Decoding a link never produces an error (it returns `Option`); these types
//! cover the steps that act on already-decoded data, where a defect has to be
//! reported instead of silently dropped.

use alloy_primitives::U256;

use crate::timestamp::UnixTimestamp;

/// A string that is not an unsigned base-10 integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an unsigned base-10 integer: {input:?}")]
pub struct ParseDecimalError {
    /// The rejected input.
    pub input: String,
}

impl ParseDecimalError {
    /// Creates a new parse error for `input`.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Reasons a decoded payment link cannot be approved by the connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApprovalError {
    /// The link was issued for a different wallet.
    #[error("payment link is for {expected}, connected wallet is {connected}")]
    SenderMismatch {
        /// Sender named in the link.
        expected: String,
        /// Address of the wallet attempting approval.
        connected: String,
    },

    /// The link's expiry lies in the past.
    #[error("payment link expired at {expiry} (now {now})")]
    Expired {
        /// Expiry carried by the link.
        expiry: UnixTimestamp,
        /// Time of the check.
        now: UnixTimestamp,
    },

    /// An amount is not a base-10 `uint256`.
    #[error("amount #{index} is not a valid uint256: {value:?}")]
    InvalidAmount {
        /// Position of the amount in the link.
        index: usize,
        /// The offending text.
        value: String,
    },

    /// The amounts add up to more than `uint256::MAX`.
    #[error("sum of amounts overflows uint256")]
    AmountOverflow,

    /// The wallet does not hold enough tokens to cover the batch.
    #[error("insufficient balance: need {required}, have {available}")]
    InsufficientBalance {
        /// Total of all amounts in the link.
        required: U256,
        /// Balance reported for the sender.
        available: U256,
    },
}

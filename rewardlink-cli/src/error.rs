//! Error types for the `rewardlink` binary.

use alloy_primitives::U256;
use rewardlink::{ApprovalError, ParseDecimalError};
use rewardlink_evm::chain::ChainId;
use rewardlink_evm::link::client::SigningError;
use rewardlink_evm::link::executor::ExecutorError;
use rewardlink_evm::link::{SignatureError, TypedDataError};

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input does not decode to a payment link.
    #[error("not a valid payment link: {0}")]
    InvalidLink(String),

    /// Recipients and amounts given to `encode` do not pair up.
    #[error("{recipients} recipients but {amounts} amounts")]
    UnpairedTransfers {
        /// Number of `--recipient` values.
        recipients: usize,
        /// Number of `--amount` values.
        amounts: usize,
    },

    /// An amount is not a base-10 `uint256`.
    #[error(transparent)]
    InvalidAmount(#[from] ParseDecimalError),

    /// The executor may not move enough of the sender's tokens.
    #[error("allowance too low: need {required}, executor may spend {available}")]
    InsufficientAllowance {
        /// Total of the link's amounts.
        required: U256,
        /// Current ERC-20 allowance granted to the executor.
        available: U256,
    },

    /// The private key could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidKey(#[from] alloy_signer_local::LocalSignerError),

    /// No RPC URL was given and the chain is not in the built-in table.
    #[error("no RPC URL configured for chain {0}")]
    MissingRpcUrl(ChainId),

    /// A built-in RPC URL failed to parse.
    #[error("invalid RPC URL: {0}")]
    InvalidRpcUrl(#[from] url::ParseError),

    /// The link fails a pre-submission check.
    #[error(transparent)]
    Approval(#[from] ApprovalError),

    /// The link does not coerce into EIP-712 values.
    #[error(transparent)]
    TypedData(#[from] TypedDataError),

    /// Signing failed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The signature does not belong to the sender.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// On-chain call or submission failed.
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    /// JSON output could not be produced.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

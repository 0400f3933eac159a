//! Error types for on-chain execution of payment links.

use alloy_primitives::{Address, TxHash};
use alloy_transport::TransportError;

use crate::chain::ChainId;
use crate::link::signature::SignatureError;

/// Errors from submitting a signed link to the executor contract.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// RPC transport error.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Pending transaction error.
    #[error(transparent)]
    PendingTransaction(#[from] alloy_provider::PendingTransactionError),
    /// On-chain transaction was reverted.
    #[error("Transaction {0} reverted")]
    TransactionReverted(TxHash),
    /// Contract call failed (including a reverted simulation).
    #[error("Contract call failed: {0}")]
    ContractCall(String),
    /// The signature does not belong to the link's sender.
    #[error(transparent)]
    Signature(#[from] SignatureError),
    /// The link was signed for another chain.
    #[error("link signed for chain {signed}, provider is on chain {connected}")]
    ChainMismatch {
        /// Chain in the signed domain.
        signed: ChainId,
        /// Chain reported by the RPC endpoint.
        connected: ChainId,
    },
    /// The link was signed for another executor deployment.
    #[error("link signed for executor {signed}, configured executor is {configured}")]
    ContractMismatch {
        /// `verifyingContract` in the signed domain.
        signed: Address,
        /// Executor this client talks to.
        configured: Address,
    },
    /// A `before_execute` hook refused the submission.
    #[error("execution aborted: {0}")]
    Aborted(String),
}

impl From<alloy_contract::Error> for ExecutorError {
    fn from(e: alloy_contract::Error) -> Self {
        match e {
            alloy_contract::Error::TransportError(e) => Self::Transport(e),
            alloy_contract::Error::PendingTransactionError(e) => Self::PendingTransaction(e),
            other => Self::ContractCall(other.to_string()),
        }
    }
}

//! Lifecycle hooks around link execution.
//!
//! Hooks are registered on the executor when it is built and run for every
//! submission, in registration order.
//!
//! - **Before**: Inspect or abort the submission
//! - **After**: Observe the transaction hash of a confirmed execution
//! - **On Failure**: Observe the error of a failed execution

use std::fmt::{self, Debug};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::TxHash;

use super::error::ExecutorError;
use crate::link::signature::SignedPaymentLink;

/// Boxed future returned by hook methods.
pub type HookFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Decision returned by [`ExecutorHooks::before_execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookDecision {
    /// Allow the submission to proceed.
    Continue,
    /// Refuse the submission.
    Abort {
        /// Reason reported in [`ExecutorError::Aborted`].
        reason: String,
    },
}

/// Lifecycle hooks for link execution.
///
/// All methods have default no-op implementations. Override only the hooks
/// you need. This trait is dyn-compatible for use in hook lists.
pub trait ExecutorHooks: Send + Sync {
    /// Called before the link is simulated and sent.
    ///
    /// The first hook returning [`HookDecision::Abort`] stops the submission.
    fn before_execute<'a>(
        &'a self,
        _link: &'a SignedPaymentLink,
    ) -> HookFuture<'a, HookDecision> {
        Box::pin(async { HookDecision::Continue })
    }

    /// Called after the transaction is confirmed.
    fn after_execute<'a>(
        &'a self,
        _link: &'a SignedPaymentLink,
        _tx_hash: TxHash,
    ) -> HookFuture<'a, ()> {
        Box::pin(async {})
    }

    /// Called when execution fails after the before hooks passed.
    fn on_execute_failure<'a>(
        &'a self,
        _link: &'a SignedPaymentLink,
        _error: &'a ExecutorError,
    ) -> HookFuture<'a, ()> {
        Box::pin(async {})
    }
}

/// Hook that counts executions, for export to a metrics backend.
#[derive(Default)]
pub struct ExecutionCounters {
    executed: AtomicU64,
    failed: AtomicU64,
    transfers: AtomicU64,
}

impl ExecutionCounters {
    /// Number of confirmed executions.
    #[must_use]
    pub fn executed(&self) -> u64 {
        self.executed.load(Ordering::Relaxed)
    }

    /// Number of failed executions.
    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Number of individual transfers in confirmed executions.
    #[must_use]
    pub fn transfers(&self) -> u64 {
        self.transfers.load(Ordering::Relaxed)
    }
}

impl Debug for ExecutionCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionCounters")
            .field("executed", &self.executed())
            .field("failed", &self.failed())
            .field("transfers", &self.transfers())
            .finish()
    }
}

impl ExecutorHooks for ExecutionCounters {
    fn after_execute<'a>(
        &'a self,
        link: &'a SignedPaymentLink,
        _tx_hash: TxHash,
    ) -> HookFuture<'a, ()> {
        Box::pin(async move {
            self.executed.fetch_add(1, Ordering::Relaxed);
            let transfers = link.request.message.recipients.len();
            let transfers = u64::try_from(transfers).unwrap_or(u64::MAX);
            self.transfers.fetch_add(transfers, Ordering::Relaxed);
        })
    }

    fn on_execute_failure<'a>(
        &'a self,
        _link: &'a SignedPaymentLink,
        _error: &'a ExecutorError,
    ) -> HookFuture<'a, ()> {
        Box::pin(async move {
            self.failed.fetch_add(1, Ordering::Relaxed);
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, Bytes};
    use rewardlink::{PaymentLinkData, UnixTimestamp};

    use super::*;
    use crate::link::typed_data::build_typed_data_request;

    fn link() -> SignedPaymentLink {
        let data = PaymentLinkData {
            token: "0x0000000000000000000000000000000000000001".into(),
            sender: "0x0000000000000000000000000000000000000002".into(),
            recipients: vec![
                "0x0000000000000000000000000000000000000003".into(),
                "0x0000000000000000000000000000000000000004".into(),
            ],
            amounts: vec!["1".into(), "2".into()],
            nonce: 0,
            expiry: UnixTimestamp::from_secs(1),
        };
        SignedPaymentLink {
            request: build_typed_data_request(1, Address::ZERO, &data).unwrap(),
            signature: Bytes::new(),
        }
    }

    struct Noop;
    impl ExecutorHooks for Noop {}

    #[tokio::test]
    async fn test_default_hooks_continue() {
        let link = link();
        assert_eq!(Noop.before_execute(&link).await, HookDecision::Continue);
    }

    #[tokio::test]
    async fn test_counters() {
        let counters = ExecutionCounters::default();
        let link = link();
        counters.after_execute(&link, TxHash::ZERO).await;
        counters
            .on_execute_failure(&link, &ExecutorError::Aborted("test".into()))
            .await;
        assert_eq!(counters.executed(), 1);
        assert_eq!(counters.failed(), 1);
        assert_eq!(counters.transfers(), 2);
    }
}

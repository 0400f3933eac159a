//! On-chain execution of signed payment links.
//!
//! [`RewardLinkExecutor`] talks to one deployed `RewardLinkExecutor`
//! contract. It checks that a [`SignedPaymentLink`] was signed for that
//! deployment and chain, simulates `executeLink`, then sends it and waits
//! for the receipt.

mod contract;
mod error;
mod hooks;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use alloy_network::Ethereum;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
#[cfg(feature = "telemetry")]
use tracing::instrument;

pub use contract::{IERC20, IRewardLinkExecutor};
pub use error::ExecutorError;
pub use hooks::{ExecutionCounters, ExecutorHooks, HookDecision, HookFuture};

use super::signature::SignedPaymentLink;

/// How long [`RewardLinkExecutor::execute`] waits for a receipt by default.
pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a deployed `RewardLinkExecutor` contract.
pub struct RewardLinkExecutor<P> {
    provider: P,
    address: Address,
    confirmations: u64,
    receipt_timeout: Duration,
    hooks: Vec<Arc<dyn ExecutorHooks>>,
}

impl<P> fmt::Debug for RewardLinkExecutor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewardLinkExecutor")
            .field("address", &self.address)
            .field("confirmations", &self.confirmations)
            .field("receipt_timeout", &self.receipt_timeout)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

impl<P: Provider<Ethereum>> RewardLinkExecutor<P> {
    /// Creates a client for the executor deployed at `address`.
    ///
    /// Waits for one confirmation, at most [`DEFAULT_RECEIPT_TIMEOUT`], and
    /// runs no hooks until configured otherwise.
    pub fn new(provider: P, address: Address) -> Self {
        Self {
            provider,
            address,
            confirmations: 1,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
            hooks: Vec::new(),
        }
    }

    /// Sets how many confirmations [`execute`](Self::execute) waits for.
    #[must_use]
    pub const fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Sets how long [`execute`](Self::execute) waits for the receipt before
    /// failing with [`ExecutorError::PendingTransaction`].
    #[must_use]
    pub const fn with_receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = timeout;
        self
    }

    /// Configured receipt timeout.
    pub const fn receipt_timeout(&self) -> Duration {
        self.receipt_timeout
    }

    /// Registers a lifecycle hook.
    #[must_use]
    pub fn with_hook(mut self, hook: impl ExecutorHooks + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Registers a hook that is also held elsewhere, such as a counter read by a metrics exporter.
    #[must_use]
    pub fn with_shared_hook(mut self, hook: Arc<dyn ExecutorHooks>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Address of the executor contract.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Reads the next unused nonce for `sender`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`] if the call fails.
    pub async fn next_nonce(&self, sender: Address) -> Result<U256, ExecutorError> {
        let contract = IRewardLinkExecutor::new(self.address, &self.provider);
        Ok(contract.getNonce(sender).call().await?)
    }

    /// Reads the `token` balance of `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`] if the call fails.
    pub async fn token_balance(
        &self,
        token: Address,
        owner: Address,
    ) -> Result<U256, ExecutorError> {
        let token = IERC20::new(token, &self.provider);
        Ok(token.balanceOf(owner).call().await?)
    }

    /// Reads how much of `token` the executor may move on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`] if the call fails.
    pub async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
    ) -> Result<U256, ExecutorError> {
        let token = IERC20::new(token, &self.provider);
        Ok(token.allowance(owner, self.address).call().await?)
    }

    /// Submits a signed link and waits for it to be mined.
    ///
    /// Hooks run around the submission: the first `before_execute` abort
    /// stops it, and exactly one of `after_execute` or `on_execute_failure`
    /// runs afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`] if the link targets another deployment or
    /// chain, the signature does not recover to the sender, the simulation
    /// reverts, the receipt does not arrive in time, or the mined
    /// transaction failed.
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err, fields(
        executor = %self.address,
        sender = %link.request.message.sender,
        recipients = link.request.message.recipients.len(),
    )))]
    pub async fn execute(&self, link: &SignedPaymentLink) -> Result<TxHash, ExecutorError> {
        for hook in &self.hooks {
            if let HookDecision::Abort { reason } = hook.before_execute(link).await {
                return Err(ExecutorError::Aborted(reason));
            }
        }

        let result = self.submit(link).await;
        match &result {
            Ok(tx_hash) => {
                for hook in &self.hooks {
                    hook.after_execute(link, *tx_hash).await;
                }
            }
            Err(error) => {
                for hook in &self.hooks {
                    hook.on_execute_failure(link, error).await;
                }
            }
        }
        result
    }

    async fn submit(&self, link: &SignedPaymentLink) -> Result<TxHash, ExecutorError> {
        let domain = &link.request.domain;
        if domain.verifying_contract != self.address {
            return Err(ExecutorError::ContractMismatch {
                signed: domain.verifying_contract,
                configured: self.address,
            });
        }
        let connected = self.provider.get_chain_id().await?;
        if domain.chain_id != connected {
            return Err(ExecutorError::ChainMismatch {
                signed: domain.chain_id,
                connected,
            });
        }
        link.verify()?;

        let message = &link.request.message;
        let contract = IRewardLinkExecutor::new(self.address, &self.provider);
        let call = contract.executeLink(
            message.token,
            message.sender,
            message.recipients.clone(),
            message.amounts.clone(),
            message.nonce,
            message.expiry,
            link.signature.clone(),
        );

        // Surface revert reasons before paying gas.
        call.call().await?;

        let pending = call.send().await?;
        let tx_hash = *pending.tx_hash();
        #[cfg(feature = "telemetry")]
        tracing::info!(%tx_hash, "executeLink sent");

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .with_timeout(Some(self.receipt_timeout))
            .get_receipt()
            .await?;
        if receipt.status() {
            #[cfg(feature = "telemetry")]
            tracing::info!(%tx_hash, "executeLink confirmed");
            Ok(tx_hash)
        } else {
            Err(ExecutorError::TransactionReverted(tx_hash))
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, U64, address};
    use alloy_provider::ProviderBuilder;
    use alloy_transport::mock::Asserter;
    use rewardlink::{PaymentLinkData, UnixTimestamp};

    use super::*;
    use crate::link::signature::SignatureError;
    use crate::link::typed_data::build_typed_data_request;

    const EXECUTOR: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

    fn unsigned_link(chain_id: u64, executor: Address) -> SignedPaymentLink {
        let data = PaymentLinkData {
            token: "0x151310CEAC3686C08c83E423a7E5Bf4EC04b3bD3".into(),
            sender: "0x00000000000000000000000000000000000000b0".into(),
            recipients: vec!["0x00000000000000000000000000000000000000c1".into()],
            amounts: vec!["10".into()],
            nonce: 0,
            expiry: UnixTimestamp::from_secs(2_000),
        };
        SignedPaymentLink {
            request: build_typed_data_request(chain_id, executor, &data).unwrap(),
            signature: Bytes::new(),
        }
    }

    fn executor(asserter: &Asserter) -> RewardLinkExecutor<impl Provider<Ethereum>> {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        RewardLinkExecutor::new(provider, EXECUTOR)
    }

    struct Deny;
    impl ExecutorHooks for Deny {
        fn before_execute<'a>(
            &'a self,
            _link: &'a SignedPaymentLink,
        ) -> HookFuture<'a, HookDecision> {
            Box::pin(async {
                HookDecision::Abort {
                    reason: "sender is blocked".into(),
                }
            })
        }
    }

    #[tokio::test]
    async fn test_receipt_timeout_defaults_and_overrides() {
        let asserter = Asserter::new();
        assert_eq!(executor(&asserter).receipt_timeout(), DEFAULT_RECEIPT_TIMEOUT);
        let executor = executor(&asserter).with_receipt_timeout(Duration::from_secs(5));
        assert_eq!(executor.receipt_timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_next_nonce() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::copy_from_slice(&U256::from(7).to_be_bytes::<32>()));
        let nonce = executor(&asserter).next_nonce(Address::ZERO).await.unwrap();
        assert_eq!(nonce, U256::from(7));
    }

    #[tokio::test]
    async fn test_rejects_other_deployment() {
        let asserter = Asserter::new();
        let link = unsigned_link(1, Address::ZERO);
        let err = executor(&asserter).execute(&link).await.unwrap_err();
        assert!(matches!(err, ExecutorError::ContractMismatch { .. }));
    }

    #[tokio::test]
    async fn test_rejects_other_chain() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(10143));
        let link = unsigned_link(1, EXECUTOR);
        let err = executor(&asserter).execute(&link).await.unwrap_err();
        assert!(matches!(
            err,
            ExecutorError::ChainMismatch {
                signed: 1,
                connected: 10143
            }
        ));
    }

    #[tokio::test]
    async fn test_rejects_missing_signature() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(1));
        let link = unsigned_link(1, EXECUTOR);
        let err = executor(&asserter).execute(&link).await.unwrap_err();
        assert!(matches!(
            err,
            ExecutorError::Signature(SignatureError::InvalidLength(0))
        ));
    }

    #[tokio::test]
    async fn test_hook_abort_skips_failure_hooks() {
        let asserter = Asserter::new();
        let counters = Arc::new(ExecutionCounters::default());
        let executor = executor(&asserter)
            .with_hook(Deny)
            .with_shared_hook(counters.clone());
        let err = executor
            .execute(&unsigned_link(1, EXECUTOR))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutorError::Aborted(reason) if reason == "sender is blocked"));
        assert_eq!(counters.failed(), 0);
    }

    #[tokio::test]
    async fn test_failure_reaches_hooks() {
        let asserter = Asserter::new();
        let counters = Arc::new(ExecutionCounters::default());
        let executor = executor(&asserter).with_shared_hook(counters.clone());
        let link = unsigned_link(1, Address::ZERO);
        assert!(executor.execute(&link).await.is_err());
        assert_eq!(counters.failed(), 1);
        assert_eq!(counters.executed(), 0);
    }
}

//! Sender-side signing of payment links.
//!
//! [`sign_payment_link`] is the approval step: it refuses links addressed to
//! another wallet or already expired, builds the EIP-712 request and signs
//! its digest with the sender's key.

use std::future::Future;
use std::sync::Arc;

use alloy_primitives::{Address, B256, Signature};
use alloy_signer_local::PrivateKeySigner;
use rewardlink::approval::check_approvable;
use rewardlink::{ApprovalError, PaymentLinkData, UnixTimestamp};
#[cfg(feature = "telemetry")]
use tracing::instrument;

use super::signature::SignedPaymentLink;
use super::typed_data::{TypedDataError, build_typed_data_request};
use crate::chain::ChainId;

/// A trait that abstracts signing operations, allowing both owned signers and Arc-wrapped signers.
///
/// Alloy's `Signer` trait is not implemented for `Arc<T>`, and
/// `PrivateKeySigner` is usually shared between tasks.
pub trait SignerLike: Send + Sync {
    /// Returns the address of the signer.
    fn address(&self) -> Address;

    /// Signs the given hash.
    fn sign_hash(
        &self,
        hash: &B256,
    ) -> impl Future<Output = Result<Signature, alloy_signer::Error>> + Send;
}

impl SignerLike for PrivateKeySigner {
    fn address(&self) -> Address {
        Self::address(self)
    }

    async fn sign_hash(&self, hash: &B256) -> Result<Signature, alloy_signer::Error> {
        alloy_signer::Signer::sign_hash(self, hash).await
    }
}

impl<T: SignerLike + Send + Sync> SignerLike for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn sign_hash(&self, hash: &B256) -> Result<Signature, alloy_signer::Error> {
        (**self).sign_hash(hash).await
    }
}

/// Errors from signing a payment link.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// The link cannot be approved by this signer right now.
    #[error(transparent)]
    Approval(#[from] ApprovalError),
    /// The link data does not coerce into EIP-712 values.
    #[error(transparent)]
    TypedData(#[from] TypedDataError),
    /// The underlying signer failed.
    #[error("signing failed: {0}")]
    Signer(#[from] alloy_signer::Error),
}

/// Signs `data` as the sender, for execution by `verifying_contract` on `chain_id`.
///
/// # Errors
///
/// Returns [`SigningError::Approval`] if the signer is not the link's sender
/// or the link expired before `now`, [`SigningError::TypedData`] for
/// malformed addresses or amounts, and [`SigningError::Signer`] if signing
/// itself fails.
#[cfg_attr(feature = "telemetry", instrument(skip_all, err, fields(
    chain_id = chain_id,
    sender = %data.sender,
    recipients = data.recipients.len(),
)))]
pub async fn sign_payment_link<S: SignerLike>(
    signer: &S,
    chain_id: ChainId,
    verifying_contract: Address,
    data: &PaymentLinkData,
    now: UnixTimestamp,
) -> Result<SignedPaymentLink, SigningError> {
    check_approvable(data, &signer.address().to_string(), now)?;

    let request = build_typed_data_request(chain_id, verifying_contract, data)?;
    let hash = request.signing_hash();
    let signature = signer.sign_hash(&hash).await?;

    Ok(SignedPaymentLink {
        request,
        signature: signature.as_bytes().into(),
    })
}

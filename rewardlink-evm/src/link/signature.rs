//! Signature parsing and sender recovery for signed payment links.
//!
//! Only EOA signatures are accepted: 65-byte `(r, s, v)` or 64-byte
//! ERC-2098 compact form. The executor contract recovers the signer with
//! `ecrecover`, so high-`s` signatures are rejected here as well.

use alloy_primitives::{Address, Bytes, Signature};
use serde::Serialize;

use super::typed_data::TypedDataRequest;

/// Errors from parsing or checking a payment-link signature.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// Signature is neither 64 nor 65 bytes.
    #[error("signature must be 64 or 65 bytes, got {0}")]
    InvalidLength(usize),
    /// The bytes do not form a valid secp256k1 signature.
    #[error(transparent)]
    Malformed(#[from] alloy_primitives::SignatureError),
    /// The `s` value lies in the upper half of the curve order.
    #[error("signature is not in canonical low-s form")]
    NonCanonical,
    /// The signature was produced by another key.
    #[error("signature recovers to {recovered}, expected sender {expected}")]
    SignerMismatch {
        /// Sender named in the message.
        expected: Address,
        /// Address recovered from the signature.
        recovered: Address,
    },
}

/// Parses raw signature bytes.
///
/// # Errors
///
/// Returns [`SignatureError`] for a wrong length, invalid components or a
/// non-canonical `s`.
pub fn parse_signature(bytes: &[u8]) -> Result<Signature, SignatureError> {
    let signature = match bytes.len() {
        65 => Signature::from_raw(bytes)?,
        64 => Signature::from_erc2098(bytes),
        len => return Err(SignatureError::InvalidLength(len)),
    };
    if signature.normalized_s() != signature {
        return Err(SignatureError::NonCanonical);
    }
    Ok(signature)
}

/// Recovers the address that signed `request`.
///
/// # Errors
///
/// Returns [`SignatureError`] if the signature cannot be parsed or
/// recovery fails.
pub fn recover_signer(
    request: &TypedDataRequest,
    signature: &[u8],
) -> Result<Address, SignatureError> {
    let signature = parse_signature(signature)?;
    let hash = request.signing_hash();
    Ok(signature.recover_address_from_prehash(&hash)?)
}

/// Checks that `signature` over `request` was produced by the link's sender.
///
/// # Errors
///
/// Returns [`SignatureError::SignerMismatch`] when another key signed, or
/// any parsing/recovery error.
pub fn verify_signature(
    request: &TypedDataRequest,
    signature: &[u8],
) -> Result<(), SignatureError> {
    let expected = request.sender();
    let recovered = recover_signer(request, signature)?;
    if recovered == expected {
        Ok(())
    } else {
        Err(SignatureError::SignerMismatch {
            expected,
            recovered,
        })
    }
}

/// A signing request together with the sender's signature.
///
/// This is everything `executeLink` needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedPaymentLink {
    /// The request that was signed.
    pub request: TypedDataRequest,
    /// 65-byte `(r, s, v)` signature with `v` in `{27, 28}`.
    pub signature: Bytes,
}

impl SignedPaymentLink {
    /// Pairs `request` with an externally produced `signature`, checking that
    /// it recovers to the sender.
    ///
    /// Compact ERC-2098 input is expanded, so the stored signature is always
    /// the 65-byte form `executeLink` expects.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] if the signature does not belong to the
    /// sender.
    pub fn new(request: TypedDataRequest, signature: Bytes) -> Result<Self, SignatureError> {
        let signature = parse_signature(&signature)?;
        let expected = request.sender();
        let recovered = signature.recover_address_from_prehash(&request.signing_hash())?;
        if recovered != expected {
            return Err(SignatureError::SignerMismatch {
                expected,
                recovered,
            });
        }
        Ok(Self {
            request,
            signature: signature.as_bytes().into(),
        })
    }

    /// Re-checks the signature against the request.
    ///
    /// # Errors
    ///
    /// See [`verify_signature`].
    pub fn verify(&self) -> Result<(), SignatureError> {
        verify_signature(&self.request, &self.signature)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, hex};
    use rewardlink::{PaymentLinkData, UnixTimestamp};

    use super::*;
    use crate::link::typed_data::build_typed_data_request;

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            parse_signature(&[0u8; 63]),
            Err(SignatureError::InvalidLength(63))
        ));
        assert!(matches!(
            parse_signature(&[]),
            Err(SignatureError::InvalidLength(0))
        ));
    }

    #[test]
    fn test_high_s_rejected() {
        // r = 1, s = n - 1 where n is the secp256k1 group order.
        let mut bytes = [0u8; 65];
        bytes[31] = 1;
        bytes[32..64].copy_from_slice(&hex!(
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140"
        ));
        bytes[64] = 27;
        assert!(matches!(
            parse_signature(&bytes),
            Err(SignatureError::NonCanonical)
        ));
    }

    #[test]
    fn test_garbage_signature_does_not_verify() {
        let data = PaymentLinkData {
            token: "0x0000000000000000000000000000000000000001".into(),
            sender: "0x0000000000000000000000000000000000000002".into(),
            recipients: vec!["0x0000000000000000000000000000000000000003".into()],
            amounts: vec!["1".into()],
            nonce: 0,
            expiry: UnixTimestamp::from_secs(1),
        };
        let request = build_typed_data_request(
            1,
            address!("0x0000000000000000000000000000000000000004"),
            &data,
        )
        .unwrap();
        let mut bytes = [0x11u8; 65];
        bytes[64] = 27;
        assert!(verify_signature(&request, &bytes).is_err());
    }
}

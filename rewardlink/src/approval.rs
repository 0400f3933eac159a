//! Checks the approving wallet runs before signing a decoded link.
//!
//! None of these run during [`decode`](crate::encoding::decode): an expired
//! or foreign link still decodes, and the approval flow reports why it
//! cannot be signed.

use alloy_primitives::U256;

use crate::amount::parse_amount;
use crate::error::ApprovalError;
use crate::link::PaymentLinkData;
use crate::timestamp::UnixTimestamp;

/// Fails unless `connected` is the link's sender (case-insensitive hex).
///
/// # Errors
///
/// Returns [`ApprovalError::SenderMismatch`].
pub fn ensure_sender(data: &PaymentLinkData, connected: &str) -> Result<(), ApprovalError> {
    if data.sender.eq_ignore_ascii_case(connected) {
        Ok(())
    } else {
        Err(ApprovalError::SenderMismatch {
            expected: data.sender.clone(),
            connected: connected.to_owned(),
        })
    }
}

/// Fails once `now` is past the link's expiry.
///
/// # Errors
///
/// Returns [`ApprovalError::Expired`].
pub fn ensure_not_expired(data: &PaymentLinkData, now: UnixTimestamp) -> Result<(), ApprovalError> {
    if data.expiry.has_passed(now) {
        Err(ApprovalError::Expired {
            expiry: data.expiry,
            now,
        })
    } else {
        Ok(())
    }
}

/// Sums all amounts of the link.
///
/// # Errors
///
/// Returns [`ApprovalError::InvalidAmount`] for an amount that is not a
/// base-10 `uint256`, or [`ApprovalError::AmountOverflow`] if the sum does
/// not fit in 256 bits.
pub fn total_amount(data: &PaymentLinkData) -> Result<U256, ApprovalError> {
    data.amounts
        .iter()
        .enumerate()
        .try_fold(U256::ZERO, |acc, (index, value)| {
            let amount = parse_amount(value).map_err(|_| ApprovalError::InvalidAmount {
                index,
                value: value.clone(),
            })?;
            acc.checked_add(amount).ok_or(ApprovalError::AmountOverflow)
        })
}

/// Fails if `balance` cannot cover the whole batch.
///
/// # Errors
///
/// Propagates [`total_amount`] errors, or returns
/// [`ApprovalError::InsufficientBalance`].
pub fn ensure_balance(data: &PaymentLinkData, balance: U256) -> Result<U256, ApprovalError> {
    let required = total_amount(data)?;
    if required > balance {
        return Err(ApprovalError::InsufficientBalance {
            required,
            available: balance,
        });
    }
    Ok(required)
}

/// Runs the sender and expiry checks together.
///
/// # Errors
///
/// Returns the first failing check.
pub fn check_approvable(
    data: &PaymentLinkData,
    connected: &str,
    now: UnixTimestamp,
) -> Result<(), ApprovalError> {
    ensure_sender(data, connected)?;
    ensure_not_expired(data, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> PaymentLinkData {
        PaymentLinkData {
            token: "0x151310CEAC3686C08c83E423a7E5Bf4EC04b3bD3".into(),
            sender: "0xAbCdEf0000000000000000000000000000000001".into(),
            recipients: vec!["0x01".into(), "0x02".into()],
            amounts: vec!["700".into(), "300".into()],
            nonce: 0,
            expiry: UnixTimestamp::from_secs(1_000),
        }
    }

    #[test]
    fn test_sender_match_ignores_case() {
        let data = link();
        assert!(ensure_sender(&data, "0xabcdef0000000000000000000000000000000001").is_ok());
        let err = ensure_sender(&data, "0x0000000000000000000000000000000000000002").unwrap_err();
        assert!(matches!(err, ApprovalError::SenderMismatch { .. }));
    }

    #[test]
    fn test_expiry_boundary() {
        let data = link();
        assert!(ensure_not_expired(&data, UnixTimestamp::from_secs(1_000)).is_ok());
        assert_eq!(
            ensure_not_expired(&data, UnixTimestamp::from_secs(1_001)),
            Err(ApprovalError::Expired {
                expiry: UnixTimestamp::from_secs(1_000),
                now: UnixTimestamp::from_secs(1_001),
            })
        );
    }

    #[test]
    fn test_total_and_balance() {
        let data = link();
        assert_eq!(total_amount(&data).unwrap(), U256::from(1_000u64));
        assert_eq!(
            ensure_balance(&data, U256::from(1_000u64)).unwrap(),
            U256::from(1_000u64)
        );
        assert!(matches!(
            ensure_balance(&data, U256::from(999u64)),
            Err(ApprovalError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_total_reports_bad_amount_index() {
        let mut data = link();
        data.amounts[1] = "3e2".into();
        assert_eq!(
            total_amount(&data),
            Err(ApprovalError::InvalidAmount {
                index: 1,
                value: "3e2".into(),
            })
        );
    }

    #[test]
    fn test_total_overflow() {
        let mut data = link();
        data.amounts = vec![U256::MAX.to_string(), "1".into()];
        assert_eq!(total_amount(&data), Err(ApprovalError::AmountOverflow));
    }

    #[test]
    fn test_check_approvable_reports_sender_first() {
        let data = link();
        let err = check_approvable(&data, "0x02", UnixTimestamp::from_secs(5_000)).unwrap_err();
        assert!(matches!(err, ApprovalError::SenderMismatch { .. }));
    }
}

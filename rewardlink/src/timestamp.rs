//! Unix timestamps for payment-link expiry.
//!
//! [`UnixTimestamp`] is the type of the `expiry` field of a payment link. It is
//! written into the link URL as plain decimal seconds and signed as a `uint256`
//! inside the `PaymentLink` typed-data message.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::Add;
use std::str::FromStr;
use std::time::SystemTime;

use crate::error::ParseDecimalError;

/// A Unix timestamp representing seconds since the Unix epoch (1970-01-01T00:00:00Z).
///
/// Serialized as a JSON number. Parsing from text accepts only base-10 digits,
/// so values such as `"+5"`, `"-1"` or `"12abc"` are rejected.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UnixTimestamp(u64);

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UnixTimestamp {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal_u64(s).map(Self)
    }
}

impl Add<u64> for UnixTimestamp {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0.saturating_add(rhs))
    }
}

impl From<u64> for UnixTimestamp {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl UnixTimestamp {
    /// Creates a new [`UnixTimestamp`] from a raw seconds value.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the current system time as a [`UnixTimestamp`].
    ///
    /// A system clock set before the Unix epoch yields `0`.
    #[must_use]
    pub fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self(now)
    }

    /// Returns the timestamp as raw seconds since the Unix epoch.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Returns `true` once `now` is strictly later than this timestamp.
    ///
    /// A link whose expiry equals the current second is still usable.
    #[must_use]
    pub const fn has_passed(&self, now: Self) -> bool {
        now.0 > self.0
    }
}

/// Parses an unsigned base-10 integer made of ASCII digits only.
///
/// `u64::from_str` tolerates a leading `+`; link fields never carry one.
pub(crate) fn parse_decimal_u64(s: &str) -> Result<u64, ParseDecimalError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseDecimalError::new(s));
    }
    s.parse::<u64>().map_err(|_| ParseDecimalError::new(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_seconds() {
        let ts: UnixTimestamp = "1999999999".parse().unwrap();
        assert_eq!(ts.as_secs(), 1_999_999_999);
    }

    #[test]
    fn test_parse_rejects_sign_and_garbage() {
        assert!("+5".parse::<UnixTimestamp>().is_err());
        assert!("-1".parse::<UnixTimestamp>().is_err());
        assert!("12abc".parse::<UnixTimestamp>().is_err());
        assert!("".parse::<UnixTimestamp>().is_err());
    }

    #[test]
    fn test_has_passed_is_strict() {
        let expiry = UnixTimestamp::from_secs(100);
        assert!(!expiry.has_passed(UnixTimestamp::from_secs(99)));
        assert!(!expiry.has_passed(UnixTimestamp::from_secs(100)));
        assert!(expiry.has_passed(UnixTimestamp::from_secs(101)));
    }

    #[test]
    fn test_serializes_as_number() {
        let ts = UnixTimestamp::from_secs(42);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "42");
        let back: UnixTimestamp = serde_json::from_str("42").unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_add_saturates() {
        let ts = UnixTimestamp::from_secs(u64::MAX - 1) + 10;
        assert_eq!(ts.as_secs(), u64::MAX);
    }
}

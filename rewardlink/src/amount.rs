//! Token amounts: strict `uint256` parsing and display formatting.

use alloy_primitives::U256;

use crate::error::ParseDecimalError;

/// Parses a token amount given in the token's smallest unit.
///
/// Only non-empty strings of ASCII digits that fit in 256 bits are accepted.
/// Hex literals, signs, separators and fractions are rejected rather than
/// reinterpreted.
///
/// # Errors
///
/// Returns [`ParseDecimalError`] for anything else.
pub fn parse_amount(value: &str) -> Result<U256, ParseDecimalError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseDecimalError::new(value));
    }
    U256::from_str_radix(value, 10).map_err(|_| ParseDecimalError::new(value))
}

/// Renders `amount` (in smallest units) as a decimal number of whole tokens.
///
/// At most `display_decimals` fractional digits are kept (truncated, not
/// rounded) and trailing zeros are dropped, so `1.5 USDC` with 6 decimals
/// and 4 display digits prints as `1.5`.
#[must_use]
pub fn format_token_amount(amount: U256, decimals: u8, display_decimals: usize) -> String {
    let Some(divisor) = U256::from(10u8).checked_pow(U256::from(decimals)) else {
        return "0".to_owned();
    };
    let whole = amount / divisor;
    let remainder = amount % divisor;
    if remainder.is_zero() {
        return whole.to_string();
    }

    let digits = remainder.to_string();
    let padded = format!("{digits:0>width$}", width = usize::from(decimals));
    let shown: String = padded.chars().take(display_decimals).collect();
    let trimmed = shown.trim_end_matches('0');
    if trimmed.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{trimmed}")
    }
}

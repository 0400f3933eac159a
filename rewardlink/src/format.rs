//! Short display forms for addresses and transaction hashes.

/// Abbreviates `address` as `0x1234...5678`.
///
/// Inputs shorter than `start + end` characters are returned unchanged.
#[must_use]
pub fn format_address(address: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < start.saturating_add(end) {
        return address.to_owned();
    }
    let head: String = chars[..start].iter().collect();
    let tail: String = chars[chars.len() - end..].iter().collect();
    format!("{head}...{tail}")
}

/// Abbreviates an address with the default `6...4` split.
#[must_use]
pub fn short_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Abbreviates a transaction hash with a `10...8` split.
#[must_use]
pub fn format_tx_hash(hash: &str) -> String {
    format_address(hash, 10, 8)
}

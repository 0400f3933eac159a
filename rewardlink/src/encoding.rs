//! Query-string codec for payment links.
//!
//! A payment link is shared as
//!
//! ```text
//! <base>/approve-payment?token=..&sender=..&recipients=a,b&amounts=x,y&nonce=N&expiry=T
//! ```
//!
//! [`encode`] and [`decode`] map a [`PaymentLinkData`] to and from the query
//! part. Encoding is infallible; decoding returns `None` for any structural
//! defect because the input comes from an untrusted URL.

use std::collections::HashMap;

use url::Url;
use url::form_urlencoded;

use crate::link::PaymentLinkData;
use crate::timestamp::{UnixTimestamp, parse_decimal_u64};

/// Path segment appended to the application base URL.
pub const APPROVE_PAYMENT_PATH: &str = "/approve-payment";

/// Separator for the `recipients` and `amounts` lists.
pub const LIST_SEPARATOR: &str = ",";

/// Query keys, in the order [`encode`] writes them.
pub mod keys {
    /// Token contract address.
    pub const TOKEN: &str = "token";
    /// Signing wallet address.
    pub const SENDER: &str = "sender";
    /// Comma-joined recipient addresses.
    pub const RECIPIENTS: &str = "recipients";
    /// Comma-joined decimal amounts.
    pub const AMOUNTS: &str = "amounts";
    /// Anti-replay counter.
    pub const NONCE: &str = "nonce";
    /// Expiry in unix seconds.
    pub const EXPIRY: &str = "expiry";
}

/// Parsed query parameters of a link URL.
///
/// When a key is repeated the first value is kept, matching how browsers
/// answer `URLSearchParams.get`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// A single leading `?` is ignored.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes()).collect()
    }

    /// Extracts the query parameters of a full URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not an absolute URL.
    pub fn from_url(url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(url)?;
        Ok(url.query_pairs().collect())
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameter is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::new();
        for (k, v) in iter {
            map.entry(k.into()).or_insert_with(|| v.into());
        }
        Self(map)
    }
}

/// Serializes a payment link into its query string.
///
/// The input is not validated. List items are joined with `,` and the
/// whole string is form-urlencoded, so commas appear as `%2C`.
#[must_use]
pub fn encode(data: &PaymentLinkData) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(keys::TOKEN, &data.token)
        .append_pair(keys::SENDER, &data.sender)
        .append_pair(keys::RECIPIENTS, &data.recipients.join(LIST_SEPARATOR))
        .append_pair(keys::AMOUNTS, &data.amounts.join(LIST_SEPARATOR))
        .append_pair(keys::NONCE, &data.nonce.to_string())
        .append_pair(keys::EXPIRY, &data.expiry.to_string())
        .finish()
}

/// Rebuilds a payment link from parsed query parameters.
///
/// Returns `None` when a required field is missing or empty, when
/// `recipients` and `amounts` differ in length, or when `nonce`/`expiry` are
/// not unsigned base-10 integers. Addresses and amounts are passed through
/// unchecked, and the expiry is not compared against the clock.
#[must_use]
pub fn decode(params: &QueryParams) -> Option<PaymentLinkData> {
    let token = required(params, keys::TOKEN)?;
    let sender = required(params, keys::SENDER)?;
    let recipients = split_list(required(params, keys::RECIPIENTS)?);
    let amounts = split_list(required(params, keys::AMOUNTS)?);
    let nonce = required(params, keys::NONCE)?;
    let expiry = required(params, keys::EXPIRY)?;

    if recipients.len() != amounts.len() {
        return reject("recipients and amounts differ in length");
    }

    let Ok(nonce) = parse_decimal_u64(nonce) else {
        return reject("nonce is not an unsigned integer");
    };
    let Ok(expiry) = expiry.parse::<UnixTimestamp>() else {
        return reject("expiry is not an unsigned integer");
    };

    Some(PaymentLinkData {
        token: token.to_owned(),
        sender: sender.to_owned(),
        recipients,
        amounts,
        nonce,
        expiry,
    })
}

/// Parses `query` and decodes it in one step.
#[must_use]
pub fn decode_query(query: &str) -> Option<PaymentLinkData> {
    decode(&QueryParams::parse(query))
}

/// Decodes the payment link carried by a full URL.
///
/// An unparsable URL is treated like any other malformed link.
#[must_use]
pub fn decode_url(url: &str) -> Option<PaymentLinkData> {
    QueryParams::from_url(url).ok().as_ref().and_then(decode)
}

/// Builds the shareable approval URL: `{base_url}/approve-payment?{query}`.
#[must_use]
pub fn generate_link_url(base_url: &str, data: &PaymentLinkData) -> String {
    format!("{base_url}{APPROVE_PAYMENT_PATH}?{}", encode(data))
}

fn split_list(value: &str) -> Vec<String> {
    value.split(LIST_SEPARATOR).map(str::to_owned).collect()
}

fn required<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    match params.get(key) {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(key, "payment link is missing a required field");
            None
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn reject<T>(reason: &'static str) -> Option<T> {
    #[cfg(feature = "telemetry")]
    tracing::debug!(reason, "rejecting payment link");
    #[cfg(not(feature = "telemetry"))]
    let _ = reason;
    None
}

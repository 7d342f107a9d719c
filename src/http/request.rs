//! Request inspection.
//!
//! # Responsibilities
//! - Derive the artificial response delay from `x-response-delay`
//! - Flatten request headers into a JSON object for the echo body
//!
//! # Design Decisions
//! - Malformed input is normalized, never rejected
//! - The delay header is read like JavaScript `parseInt`: leading integer,
//!   trailing garbage ignored

use std::time::Duration;

use axum::http::HeaderMap;
use serde_json::{Map, Value};

/// Header carrying the requested delay in milliseconds.
pub const X_RESPONSE_DELAY: &str = "x-response-delay";

/// Delay used when the header is absent, unparsable, or zero.
pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 500;

/// Longest honored delay (2^31 - 1 ms). Larger values fire after
/// [`OVERFLOW_RESPONSE_DELAY_MS`], the same rule JavaScript timers apply.
pub const MAX_RESPONSE_DELAY_MS: u64 = i32::MAX as u64;

/// Delay used when the requested one exceeds [`MAX_RESPONSE_DELAY_MS`].
pub const OVERFLOW_RESPONSE_DELAY_MS: u64 = 1;

/// Delay to apply before answering a POST.
pub fn response_delay(headers: &HeaderMap) -> Duration {
    let parsed = headers
        .get(X_RESPONSE_DELAY)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_leading_int);

    let millis = match parsed {
        Some(n) if n != 0 => n.max(0) as u64,
        _ => DEFAULT_RESPONSE_DELAY_MS,
    };
    let millis = if millis > MAX_RESPONSE_DELAY_MS {
        OVERFLOW_RESPONSE_DELAY_MS
    } else {
        millis
    };
    Duration::from_millis(millis)
}

/// Parse the integer prefix of `raw`, accepting an optional sign and a `0x`
/// prefix for hex. Returns `None` when no digits are found. Saturates
/// instead of overflowing.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }

    seen.then(|| if negative { -value } else { value })
}

/// Request headers as a JSON object keyed by lower-case name.
///
/// Repeated headers are joined with ", ".
pub fn headers_json(headers: &HeaderMap) -> Map<String, Value> {
    let mut map = Map::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        map.insert(name.as_str().to_string(), Value::String(joined));
    }
    map
}

//! Client identification utilities
//!
//! Derives the rate-limiting key for a request from HTTP headers.

use axum::http::HeaderMap;

/// Bucket used when no client address can be determined.
///
/// Requests without a forwarded-for header all share this bucket, so a
/// misconfigured proxy degrades to one global limit instead of unlimited
/// traffic.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Default rate-limit key: leftmost `X-Forwarded-For` address.
///
/// The leftmost entry is the original client as reported by the first
/// proxy; later entries are intermediate hops. Falls back to
/// [`UNKNOWN_CLIENT`] when the header is missing or unreadable. Callers
/// needing per-IP precision behind exotic proxy setups must supply their
/// own extractor.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .map(|ip| ip.trim())
        .filter(|ip| !ip.is_empty())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

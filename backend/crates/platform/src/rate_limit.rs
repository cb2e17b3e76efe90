//! Rate Limiting Infrastructure
//!
//! Fixed-window request counting keyed by client identity. Windows are
//! process-local and die with the process; the limiter throttles abuse,
//! it is not a hard security boundary.

use std::borrow::Cow;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use dashmap::DashMap;

use crate::client::client_key;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
    /// Human-readable rejection message returned to the client
    pub message: Cow<'static, str>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
            message: Cow::Borrowed("Demasiadas solicitudes, intente de nuevo más tarde"),
        }
    }
}

impl RateLimitConfig {
    pub fn new(
        max_requests: u32,
        window: Duration,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            max_requests,
            window,
            message: message.into(),
        }
    }
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests left in the current window (0 when rejected)
    pub remaining: u32,
    /// Seconds until the window resets, set on rejection
    pub retry_after_secs: Option<u64>,
}

/// Per-key counter state. A record is reset in place when its window has
/// elapsed and removed entirely by [`FixedWindowLimiter::sweep`].
#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// Fixed-window rate limiter over a concurrent map.
///
/// The map's per-shard entry lock serializes updates to a key's window,
/// so concurrent bursts from one client cannot lose increments. Keys are
/// independent; there is no cross-key coordination.
pub struct FixedWindowLimiter {
    config: RateLimitConfig,
    windows: DashMap<String, Window>,
}

impl FixedWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: DashMap::new(),
        }
    }

    /// Rejection message configured for this limiter.
    pub fn message(&self) -> &str {
        &self.config.message
    }

    /// Check and count a request from `key`.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    /// Check using the default client-identity rule (leftmost
    /// forwarded-for address, else the shared "unknown" bucket).
    pub fn check_headers(&self, headers: &HeaderMap) -> RateLimitDecision {
        self.check(&client_key(headers))
    }

    fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let max = self.config.max_requests;

        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| Window { count: 0, started: now });
        let window = entry.value_mut();

        // A fresh entry (count 0) and an expired window both start a new one.
        if window.count == 0 || now.duration_since(window.started) > self.config.window {
            window.count = 1;
            window.started = now;
            return RateLimitDecision {
                allowed: true,
                remaining: max.saturating_sub(1),
                retry_after_secs: None,
            };
        }

        window.count += 1;

        if window.count > max {
            let rest = self
                .config
                .window
                .saturating_sub(now.duration_since(window.started));
            let mut retry_after = rest.as_secs();
            if rest.subsec_nanos() > 0 {
                retry_after += 1;
            }
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                retry_after_secs: Some(retry_after),
            };
        }

        RateLimitDecision {
            allowed: true,
            remaining: max - window.count,
            retry_after_secs: None,
        }
    }

    /// Drop every record whose window has fully elapsed.
    ///
    /// Run periodically from a background task to bound memory growth. A
    /// request racing the sweep simply recreates its record.
    pub fn sweep(&self) -> usize {
        let window = self.config.window;
        let now = Instant::now();
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.duration_since(w.started) <= window);
        let removed = before.saturating_sub(self.windows.len());
        if removed > 0 {
            tracing::debug!(removed, "rate limit sweep removed expired windows");
        }
        removed
    }

    /// Number of tracked keys, for observability.
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}

//! Rate-Limit Guard
//!
//! The three limiter groups the gateway runs with, and the guard that
//! turns a limiter rejection into the HTTP 429 error.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use platform::rate_limit::{FixedWindowLimiter, RateLimitConfig};

use crate::error::{GatewayError, GatewayResult};

/// Limiter instances, one per endpoint group.
///
/// Shared between the routers and the background sweep task; keys are
/// tracked independently per group, so an OTP burst does not consume the
/// client's login budget. The general limiter is handed to the stores
/// router as well, hence the per-group `Arc`s.
pub struct GatewayLimiters {
    /// Login + register: 10 requests per 15 minutes
    pub auth: Arc<FixedWindowLimiter>,
    /// Recovery + OTP verification: 5 requests per 5 minutes
    pub otp: Arc<FixedWindowLimiter>,
    /// Everything else: 60 requests per minute
    pub api: Arc<FixedWindowLimiter>,
}

impl Default for GatewayLimiters {
    fn default() -> Self {
        Self {
            auth: Arc::new(FixedWindowLimiter::new(RateLimitConfig::new(
                10,
                Duration::from_secs(15 * 60),
                "Demasiados intentos de autenticación. Intente de nuevo en 15 minutos.",
            ))),
            otp: Arc::new(FixedWindowLimiter::new(RateLimitConfig::new(
                5,
                Duration::from_secs(5 * 60),
                "Demasiados intentos de verificación. Intente de nuevo en 5 minutos.",
            ))),
            api: Arc::new(FixedWindowLimiter::new(RateLimitConfig::new(
                60,
                Duration::from_secs(60),
                "Límite de solicitudes alcanzado. Intente de nuevo en un momento.",
            ))),
        }
    }
}

impl GatewayLimiters {
    /// Sweep all groups; returns the total number of records removed.
    pub fn sweep(&self) -> usize {
        self.auth.sweep() + self.otp.sweep() + self.api.sweep()
    }
}

/// Gate a request on `limiter`, keyed by the default client-identity rule.
pub fn enforce(limiter: &FixedWindowLimiter, headers: &HeaderMap) -> GatewayResult<()> {
    let decision = limiter.check_headers(headers);

    if decision.allowed {
        Ok(())
    } else {
        Err(GatewayError::RateLimited {
            message: limiter.message().to_string(),
            retry_after_secs: decision.retry_after_secs.unwrap_or(1),
        })
    }
}

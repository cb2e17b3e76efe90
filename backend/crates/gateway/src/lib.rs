//! Request Gateway Module
//!
//! Thin proxy layer between the loyalty-program frontend and its upstream
//! services (auth API, Jinx access-token API, Nasus purchase/points API).
//!
//! Clean Architecture structure:
//! - `domain/` - Validated field value objects, upstream service contracts
//! - `application/` - Use cases, one per endpoint
//! - `infra/` - reqwest implementations of the upstream contracts
//! - `presentation/` - HTTP handlers, DTOs, router, rate-limit guard
//!
//! ## Request pipeline
//! Every endpoint follows the same order, short-circuiting on the first
//! failure: rate check, body parse, field validation, upstream call,
//! response/cookie shaping. Upstream services are opaque; their credentials
//! (`accessToken`, `refreshToken`, `Token`, `AccessKey`) are carried as
//! HttpOnly cookies and never interpreted here.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use infra::http::HttpBackend;
pub use presentation::middleware::GatewayLimiters;
pub use presentation::router::{gateway_router, gateway_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

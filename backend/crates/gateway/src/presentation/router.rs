//! Gateway Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::GatewayConfig;
use crate::domain::upstream::{AccessBackend, AuthBackend, PointsBackend};
use crate::infra::http::HttpBackend;
use crate::presentation::handlers::{self, GatewayAppState};
use crate::presentation::middleware::GatewayLimiters;

/// Create the gateway router with the reqwest backend
pub fn gateway_router(
    backend: HttpBackend,
    config: GatewayConfig,
    limiters: Arc<GatewayLimiters>,
) -> Router {
    gateway_router_generic(backend, config, limiters)
}

/// Create a generic gateway router for any backend implementation
pub fn gateway_router_generic<B>(
    backend: B,
    config: GatewayConfig,
    limiters: Arc<GatewayLimiters>,
) -> Router
where
    B: AuthBackend + AccessBackend + PointsBackend + Clone + Send + Sync + 'static,
{
    let state = GatewayAppState {
        backend: Arc::new(backend),
        config: Arc::new(config),
        limiters,
    };

    Router::new()
        .route("/auth/login", post(handlers::login::<B>))
        .route("/auth/register", post(handlers::register::<B>))
        .route("/auth/recovery", post(handlers::recovery::<B>))
        .route("/auth/recovery/verifyotp", post(handlers::verify_otp::<B>))
        .route("/jinx/UserAccess", get(handlers::user_access::<B>))
        .route("/nasus/cliente/compras", get(handlers::purchases::<B>))
        .route("/nasus/cliente/puntos", get(handlers::points::<B>))
        .with_state(state)
}

//! Stores HTTP surface

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use kernel::error::app_error::{AppError, AppResult};
use platform::rate_limit::FixedWindowLimiter;

use crate::cache::StoreCache;
use crate::geo::with_distances;

/// Cache policy advertised to browsers and CDNs
const CACHE_CONTROL_VALUE: &str = "public, max-age=3600, stale-while-revalidate=86400";

const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Shared state for store handlers
#[derive(Clone)]
pub struct StoresAppState {
    pub cache: Arc<StoreCache>,
    /// The gateway's general API limiter, shared across route groups
    pub limiter: Arc<FixedWindowLimiter>,
}

/// Optional search point; when both are present, stores come back sorted
/// by proximity with distance fields attached.
#[derive(Debug, Clone, Deserialize)]
pub struct NearQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// GET /api/stores
pub async fn list_stores(
    State(state): State<StoresAppState>,
    headers: HeaderMap,
    Query(query): Query<NearQuery>,
) -> AppResult<Response> {
    let decision = state.limiter.check_headers(&headers);
    if !decision.allowed {
        return Err(
            AppError::too_many_requests(state.limiter.message().to_string())
                .with_retry_after(decision.retry_after_secs.unwrap_or(1)),
        );
    }

    let (stores, status) = state.cache.get().await?;

    let cache_headers = [
        (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
        (X_CACHE, status.as_str()),
    ];

    let response = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => (
            cache_headers,
            Json(with_distances((*stores).clone(), lat, lng)),
        )
            .into_response(),
        _ => (cache_headers, Json((*stores).clone())).into_response(),
    };

    Ok(response)
}

/// Create the stores router
pub fn stores_router(cache: Arc<StoreCache>, limiter: Arc<FixedWindowLimiter>) -> Router {
    let state = StoresAppState { cache, limiter };

    Router::new().route("/", get(list_stores)).with_state(state)
}

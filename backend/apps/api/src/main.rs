//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level failures flow
//! through the gateway's own error types.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router, http,
    http::{Method, header},
};
use gateway::{GatewayConfig, GatewayLimiters, HttpBackend, gateway_router};
use stores::StoreCache;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often expired rate-limit windows are swept away
const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "loyalty_api=info,gateway=info,stores=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = gateway_config_from_env();
    tracing::info!(
        auth = %config.auth_base_url,
        jinx = %config.jinx_base_url,
        nasus = %config.nasus_base_url,
        secure_cookies = config.cookie_secure,
        "Gateway configured"
    );

    let backend = HttpBackend::new(&config)?;

    // Rate limiters, shared with the background sweep
    let limiters = Arc::new(GatewayLimiters::default());

    let sweeper = limiters.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        // The first tick completes immediately; skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = sweeper.sweep();
            if removed > 0 {
                tracing::debug!(removed, "Swept expired rate-limit windows");
            }
        }
    });

    // Store dataset cache (1 hour TTL)
    let stores_path = env::var("STORES_DATA_PATH")
        .unwrap_or_else(|_| "public/places-details.json".to_string());
    let store_cache = Arc::new(StoreCache::with_default_ttl(stores_path));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = gateway_router(backend, config, limiters.clone()).nest(
        "/stores",
        stores::stores_router(store_cache, limiters.api.clone()),
    );

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the gateway configuration from the environment, falling back to
/// the development defaults for anything unset.
fn gateway_config_from_env() -> GatewayConfig {
    let mut config = GatewayConfig::default();

    if let Ok(url) = env::var("URL_API_AUTH") {
        config.auth_base_url = url;
    }
    if let Ok(url) = env::var("URL_API_JINX") {
        config.jinx_base_url = url;
    }
    if let Ok(url) = env::var("URL_API_NASUS") {
        config.nasus_base_url = url;
    }
    if let Ok(empresa) = env::var("EMPRESA") {
        config.empresa = empresa;
    }

    // Secure cookies only in production, like the frontend expects.
    config.cookie_secure = env::var("APP_ENV").is_ok_and(|e| e == "production");

    config
}

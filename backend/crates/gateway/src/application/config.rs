//! Application Configuration
//!
//! Configuration for the gateway application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Cookie names, fixed by the frontend contract
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
pub const USER_ID_COOKIE: &str = "userId";
pub const TOKEN_COOKIE: &str = "Token";
pub const ACCESS_KEY_COOKIE: &str = "AccessKey";

/// Gateway application configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the auth service
    pub auth_base_url: String,
    /// Base URL of the Jinx access-token service
    pub jinx_base_url: String,
    /// Base URL of the Nasus purchase/points service
    pub nasus_base_url: String,
    /// Tenant identifier ("Empresa") sent to the access-token service
    pub empresa: String,
    /// Whether to require the Secure cookie attribute (production)
    pub cookie_secure: bool,
    /// SameSite policy for every cookie this gateway sets
    pub cookie_same_site: SameSite,
    /// Lifetime of the Jinx session `Token` cookie (6 hours)
    pub token_cookie_max_age: Duration,
    /// Timeout applied to every upstream call
    pub upstream_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            auth_base_url: "http://localhost:4000".to_string(),
            jinx_base_url: "http://localhost:4100".to_string(),
            nasus_base_url: "http://localhost:4200".to_string(),
            empresa: String::new(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            token_cookie_max_age: Duration::from_secs(21600),
            upstream_timeout: Duration::from_secs(10),
        }
    }
}

impl GatewayConfig {
    /// Create config for development (insecure cookies)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Token cookie Max-Age in whole seconds
    pub fn token_cookie_max_age_secs(&self) -> i64 {
        self.token_cookie_max_age.as_secs() as i64
    }
}

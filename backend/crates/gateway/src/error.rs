//! Gateway Error Types
//!
//! This module provides gateway-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::Json;
use axum::http::StatusCode;
use axum::http::header::RETRY_AFTER;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Gateway-specific result type alias
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway-specific error variants
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request rejected by a rate limiter
    #[error("{message}")]
    RateLimited {
        message: String,
        retry_after_secs: u64,
    },

    /// A request field failed validation
    #[error("{0}")]
    Validation(String),

    /// UserAccess requested without an AccessKey cookie
    #[error("AccessKey no encontrado")]
    MissingAccessKey,

    /// The access-token service refused the key (`Estado: false`)
    #[error("{message}")]
    AccessDenied { message: String },

    /// Upstream answered with an error status; forwarded as-is
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Upstream did not answer within the configured timeout
    #[error("El servicio no respondió a tiempo")]
    UpstreamTimeout,

    /// Upstream success body is missing fields this layer depends on.
    /// `message` is the per-endpoint generic shown to the client,
    /// `detail` is what actually went wrong, for the log.
    #[error("{message}")]
    UpstreamShape {
        message: String,
        detail: &'static str,
    },

    /// Network failure talking to upstream
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Internal error
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::MissingAccessKey | GatewayError::AccessDenied { .. } => {
                StatusCode::UNAUTHORIZED
            }
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::UpstreamShape { .. }
            | GatewayError::Transport { .. }
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GatewayError::Transport { message, source } => {
                tracing::error!(error = %source, "{message}");
            }
            GatewayError::UpstreamShape { detail, .. } => {
                tracing::error!(detail, "Unexpected upstream response shape");
            }
            GatewayError::UpstreamTimeout => {
                tracing::error!("Upstream request timed out");
            }
            GatewayError::Internal(msg) => {
                tracing::error!(message = %msg, "Gateway internal error");
            }
            GatewayError::RateLimited { .. } => {
                tracing::warn!("Rate limit exceeded");
            }
            GatewayError::Upstream { status, message } => {
                tracing::debug!(status, message = %message, "Upstream rejected request");
            }
            _ => {
                tracing::debug!(error = %self, "Gateway request rejected");
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let body = serde_json::json!({ "error": self.to_string() });
        let mut response = (status, Json(body)).into_response();

        if let GatewayError::RateLimited {
            retry_after_secs, ..
        } = &self
        {
            if let Ok(value) = retry_after_secs.to_string().parse() {
                response.headers_mut().insert(RETRY_AFTER, value);
            }
        }

        response
    }
}

/// Validation failures arrive from the value objects as 400-kinded
/// [`AppError`]s; anything else means a bug in this crate.
impl From<AppError> for GatewayError {
    fn from(err: AppError) -> Self {
        if err.kind() == ErrorKind::BadRequest {
            GatewayError::Validation(err.message().to_string())
        } else {
            GatewayError::Internal(err.message().to_string())
        }
    }
}

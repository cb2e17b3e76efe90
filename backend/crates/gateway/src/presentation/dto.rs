//! API DTOs (Data Transfer Objects)
//!
//! Request fields are all optional strings: presence and shape are the
//! validators' responsibility, so an absent field earns its Spanish
//! "es requerido" message instead of a serde type error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dni: Option<String>,
    pub mobile: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<String>,
}

// ============================================================================
// Recovery
// ============================================================================

/// Recovery (generate OTP) request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryRequest {
    pub email: Option<String>,
}

/// OTP verification request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Fixed-message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// OTP verification response: fixed message plus the upstream body
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpResponse {
    pub message: String,
    pub data: Value,
}

// ============================================================================
// Query parameters
// ============================================================================

/// `?dni=` query for the Nasus proxy endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct DniQuery {
    pub dni: Option<String>,
}

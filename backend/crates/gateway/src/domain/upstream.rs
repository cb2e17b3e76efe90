//! Upstream Service Contracts
//!
//! Interfaces to the opaque backend services this gateway fronts.
//! Implementations live in the infrastructure layer; replies are parsed
//! into explicit types so a missing field fails loudly here instead of
//! surfacing as a null dereference somewhere downstream.

use serde::Serialize;
use serde_json::Value;

use crate::domain::value_object::{Dni, Email, OtpCode, Password};
use crate::error::GatewayResult;

/// Successful login reply from the auth service.
///
/// `body` keeps the upstream JSON verbatim - the frontend receives it
/// unchanged while the extracted fields become cookies.
#[derive(Debug, Clone)]
pub struct LoginReply {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub body: Value,
}

/// Successful registration reply from the auth service.
#[derive(Debug, Clone)]
pub struct RegisterReply {
    pub user_id: String,
    pub body: Value,
}

/// Reply from the Jinx access-token service (`{Estado, Token?, Mensaje?}`).
#[derive(Debug, Clone)]
pub struct AccessReply {
    pub granted: bool,
    pub token: Option<String>,
    pub message: Option<String>,
    pub body: Value,
}

/// Normalized registration fields, serialized in the exact shape the
/// auth service expects. Optional fields are omitted when absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    pub mobile: String,
}

/// Auth service contract
#[trait_variant::make(AuthBackend: Send)]
pub trait LocalAuthBackend {
    /// `POST /api/auth/login`
    async fn login(&self, email: &Email, password: &Password) -> GatewayResult<LoginReply>;

    /// `POST /api/auth/register`
    async fn register(&self, payload: &RegisterPayload) -> GatewayResult<RegisterReply>;

    /// `POST /api/recovery/generate-otp`
    async fn generate_otp(&self, email: &Email) -> GatewayResult<()>;

    /// `POST /api/recovery/verify-otp-only`
    async fn verify_otp(&self, email: &Email, otp: &OtpCode) -> GatewayResult<Value>;
}

/// Jinx access-token service contract
#[trait_variant::make(AccessBackend: Send)]
pub trait LocalAccessBackend {
    /// `POST /api/UserAccess` with the tenant id and the client's key
    async fn user_access(&self, empresa: &str, access_key: &str) -> GatewayResult<AccessReply>;
}

/// Nasus purchase/points service contract (read-only)
#[trait_variant::make(PointsBackend: Send)]
pub trait LocalPointsBackend {
    /// `GET cliente/compras?dni=`
    async fn purchases(&self, dni: &Dni) -> GatewayResult<Value>;

    /// `GET cliente/puntos?dni=`
    async fn points(&self, dni: &Dni) -> GatewayResult<Value>;
}

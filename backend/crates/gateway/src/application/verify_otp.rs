//! OTP Verification Use Case
//!
//! Checks a recovery code against the auth service. The upstream body is
//! returned to the caller under `data` (it carries the reset ticket).

use serde_json::Value;
use std::sync::Arc;

use crate::domain::upstream::AuthBackend;
use crate::domain::value_object::{Email, OtpCode};
use crate::error::GatewayResult;

/// Message returned on success
pub const OTP_VERIFIED_MESSAGE: &str = "Código OTP verificado correctamente";

/// OTP verification input
pub struct VerifyOtpInput {
    pub email: Option<String>,
    pub otp: Option<String>,
}

/// OTP verification use case
pub struct VerifyOtpUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> VerifyOtpUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> GatewayResult<Value> {
        let email = Email::new(input.email.unwrap_or_default())?;
        let otp = OtpCode::new(input.otp.unwrap_or_default())?;

        self.backend.verify_otp(&email, &otp).await
    }
}

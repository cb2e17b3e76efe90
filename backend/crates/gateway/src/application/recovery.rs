//! Recovery Use Case
//!
//! Asks the auth service to email a one-time recovery code. The response
//! message is fixed; whether the address exists is never revealed.

use std::sync::Arc;

use crate::domain::upstream::AuthBackend;
use crate::domain::value_object::Email;
use crate::error::GatewayResult;

/// Message returned on success
pub const RECOVERY_SENT_MESSAGE: &str = "Correo de recuperación enviado";

/// Recovery input
pub struct RecoveryInput {
    pub email: Option<String>,
}

/// Recovery (generate OTP) use case
pub struct RecoveryUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> RecoveryUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, input: RecoveryInput) -> GatewayResult<()> {
        let email = Email::new(input.email.unwrap_or_default())?;
        self.backend.generate_otp(&email).await
    }
}

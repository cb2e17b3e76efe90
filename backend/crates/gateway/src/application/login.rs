//! Login Use Case
//!
//! Validates credentials and forwards them to the auth service. The
//! handler turns the reply's tokens into cookies.

use std::sync::Arc;

use crate::domain::upstream::{AuthBackend, LoginReply};
use crate::domain::value_object::{Email, Password};
use crate::error::GatewayResult;

/// Login input, straight off the wire
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login use case
pub struct LoginUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> LoginUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, input: LoginInput) -> GatewayResult<LoginReply> {
        let email = Email::new(input.email.unwrap_or_default())?;
        let password = Password::new(input.password.unwrap_or_default())?;

        self.backend.login(&email, &password).await
    }
}

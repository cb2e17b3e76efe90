//! User Access Use Case
//!
//! Exchanges the long-lived `AccessKey` cookie for a short-lived session
//! `Token` via the Jinx service. A still-present `Token` cookie
//! short-circuits the exchange entirely; expiry is enforced only by the
//! cookie's Max-Age, never re-validated upstream. That trust boundary is
//! deliberate and pending stakeholder review.

use serde_json::Value;
use std::sync::Arc;

use crate::application::config::GatewayConfig;
use crate::domain::upstream::AccessBackend;
use crate::error::{GatewayError, GatewayResult};

/// Cookie values read from the request
pub struct UserAccessInput {
    pub token_cookie: Option<String>,
    pub access_key_cookie: Option<String>,
}

/// Outcome of the access-token exchange
#[derive(Debug)]
pub enum UserAccessOutcome {
    /// The session cookie is still present; upstream was not consulted
    TokenStillValid,
    /// Upstream granted access; `token` becomes the new session cookie
    Granted { token: String, body: Value },
}

/// User access use case
pub struct UserAccessUseCase<B>
where
    B: AccessBackend,
{
    backend: Arc<B>,
    config: Arc<GatewayConfig>,
}

impl<B> UserAccessUseCase<B>
where
    B: AccessBackend,
{
    pub fn new(backend: Arc<B>, config: Arc<GatewayConfig>) -> Self {
        Self { backend, config }
    }

    pub async fn execute(&self, input: UserAccessInput) -> GatewayResult<UserAccessOutcome> {
        if input.token_cookie.is_some() {
            return Ok(UserAccessOutcome::TokenStillValid);
        }

        let access_key = input
            .access_key_cookie
            .filter(|key| !key.is_empty())
            .ok_or(GatewayError::MissingAccessKey)?;

        let reply = self
            .backend
            .user_access(&self.config.empresa, &access_key)
            .await?;

        if !reply.granted {
            return Err(GatewayError::AccessDenied {
                message: reply
                    .message
                    .unwrap_or_else(|| "Acceso denegado".to_string()),
            });
        }

        let token = reply.token.ok_or(GatewayError::UpstreamShape {
            message: "Error during access validation".to_string(),
            detail: "UserAccess granted without a Token",
        })?;

        Ok(UserAccessOutcome::Granted {
            token,
            body: reply.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::MockBackend;

    fn use_case(backend: MockBackend) -> UserAccessUseCase<MockBackend> {
        UserAccessUseCase::new(Arc::new(backend), Arc::new(GatewayConfig::development()))
    }

    #[tokio::test]
    async fn test_token_cookie_short_circuits() {
        let backend = MockBackend::default();
        let use_case = use_case(backend.clone());

        let outcome = use_case
            .execute(UserAccessInput {
                token_cookie: Some("existing".to_string()),
                access_key_cookie: Some("key".to_string()),
            })
            .await
            .unwrap();

        assert!(matches!(outcome, UserAccessOutcome::TokenStillValid));
        assert_eq!(backend.user_access_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_access_key() {
        let use_case = use_case(MockBackend::default());

        let err = use_case
            .execute(UserAccessInput {
                token_cookie: None,
                access_key_cookie: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::MissingAccessKey));
    }

    #[tokio::test]
    async fn test_granted_returns_token() {
        let backend = MockBackend::default().with_access_granted("nuevo-token");
        let use_case = use_case(backend);

        let outcome = use_case
            .execute(UserAccessInput {
                token_cookie: None,
                access_key_cookie: Some("key".to_string()),
            })
            .await
            .unwrap();

        match outcome {
            UserAccessOutcome::Granted { token, .. } => assert_eq!(token, "nuevo-token"),
            UserAccessOutcome::TokenStillValid => panic!("expected Granted"),
        }
    }

    #[tokio::test]
    async fn test_denied_maps_to_unauthorized() {
        let backend = MockBackend::default().with_access_denied("Clave vencida");
        let use_case = use_case(backend);

        let err = use_case
            .execute(UserAccessInput {
                token_cookie: None,
                access_key_cookie: Some("key".to_string()),
            })
            .await
            .unwrap_err();

        match err {
            GatewayError::AccessDenied { message } => assert_eq!(message, "Clave vencida"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

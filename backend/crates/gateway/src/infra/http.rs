//! HTTP Upstream Backend
//!
//! One reqwest client shared across the three upstream services. Every
//! call carries the configured timeout; a timeout maps to 504 while any
//! other transport failure maps to the endpoint's generic 500 message.

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use crate::application::config::GatewayConfig;
use crate::domain::upstream::{
    AccessBackend, AccessReply, AuthBackend, LoginReply, PointsBackend, RegisterPayload,
    RegisterReply,
};
use crate::domain::value_object::{Dni, Email, OtpCode, Password};
use crate::error::{GatewayError, GatewayResult};

/// reqwest-backed implementation of the upstream contracts
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    auth_base: String,
    jinx_base: String,
    nasus_base: String,
}

impl HttpBackend {
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            auth_base: trim_base(&config.auth_base_url),
            jinx_base: trim_base(&config.jinx_base_url),
            nasus_base: trim_base(&config.nasus_base_url),
        })
    }

    async fn post_json(
        &self,
        url: String,
        body: Value,
        generic: &'static str,
    ) -> GatewayResult<(StatusCode, Value)> {
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport(e, generic))?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| transport(e, generic))?;

        Ok((status, body))
    }

    async fn get_json(
        &self,
        url: String,
        query: &[(&str, &str)],
        generic: &'static str,
    ) -> GatewayResult<(StatusCode, Value)> {
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport(e, generic))?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| transport(e, generic))?;

        Ok((status, body))
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn transport(err: reqwest::Error, generic: &'static str) -> GatewayError {
    if err.is_timeout() {
        GatewayError::UpstreamTimeout
    } else {
        GatewayError::Transport {
            message: generic.to_string(),
            source: err,
        }
    }
}

/// `{"message": ...}` from an upstream error body, else the fallback.
fn upstream_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

fn required_str(body: &Value, pointer: &str) -> Option<String> {
    body.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}

impl AuthBackend for HttpBackend {
    async fn login(&self, email: &Email, password: &Password) -> GatewayResult<LoginReply> {
        let (status, body) = self
            .post_json(
                format!("{}/api/auth/login", self.auth_base),
                json!({ "email": email.as_str(), "password": password.as_str() }),
                "Error during login",
            )
            .await?;

        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body, "Error during login"),
            });
        }

        let access_token =
            required_str(&body, "/accessToken").ok_or(GatewayError::UpstreamShape {
                message: "Error during login".to_string(),
                detail: "login reply missing accessToken",
            })?;
        let refresh_token =
            required_str(&body, "/refreshToken").ok_or(GatewayError::UpstreamShape {
                message: "Error during login".to_string(),
                detail: "login reply missing refreshToken",
            })?;
        let user_id = required_str(&body, "/user/_id").ok_or(GatewayError::UpstreamShape {
            message: "Error during login".to_string(),
            detail: "login reply missing user._id",
        })?;

        Ok(LoginReply {
            access_token,
            refresh_token,
            user_id,
            body,
        })
    }

    async fn register(&self, payload: &RegisterPayload) -> GatewayResult<RegisterReply> {
        let body = serde_json::to_value(payload)
            .map_err(|e| GatewayError::Internal(format!("Failed to serialize payload: {e}")))?;

        let (status, body) = self
            .post_json(
                format!("{}/api/auth/register", self.auth_base),
                body,
                "Error during registration",
            )
            .await?;

        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body, "Error during registration"),
            });
        }

        let user_id = required_str(&body, "/user/_id").ok_or(GatewayError::UpstreamShape {
            message: "Error during registration".to_string(),
            detail: "register reply missing user._id",
        })?;

        Ok(RegisterReply { user_id, body })
    }

    async fn generate_otp(&self, email: &Email) -> GatewayResult<()> {
        let (status, body) = self
            .post_json(
                format!("{}/api/recovery/generate-otp", self.auth_base),
                json!({ "email": email.as_str() }),
                "Error al enviar el correo de recuperación",
            )
            .await?;

        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body, "Error al enviar el correo de recuperación"),
            });
        }

        Ok(())
    }

    async fn verify_otp(&self, email: &Email, otp: &OtpCode) -> GatewayResult<Value> {
        let (status, body) = self
            .post_json(
                format!("{}/api/recovery/verify-otp-only", self.auth_base),
                json!({ "email": email.as_str(), "otpCode": otp.as_str() }),
                "Error al enviar el correo de recuperación",
            )
            .await?;

        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body, "Error al verificar el código OTP"),
            });
        }

        Ok(body)
    }
}

impl AccessBackend for HttpBackend {
    /// The Jinx service reports failure through `Estado`, not the HTTP
    /// status, so the status is deliberately ignored here.
    async fn user_access(&self, empresa: &str, access_key: &str) -> GatewayResult<AccessReply> {
        let (_status, body) = self
            .post_json(
                format!("{}/api/UserAccess", self.jinx_base),
                json!({ "Empresa": empresa, "AccessKey": access_key }),
                "Error during access validation",
            )
            .await?;

        Ok(AccessReply {
            granted: body.get("Estado").and_then(Value::as_bool).unwrap_or(false),
            token: required_str(&body, "/Token"),
            message: required_str(&body, "/Mensaje"),
            body,
        })
    }
}

impl PointsBackend for HttpBackend {
    async fn purchases(&self, dni: &Dni) -> GatewayResult<Value> {
        let (status, body) = self
            .get_json(
                format!("{}/api/cliente/compras", self.nasus_base),
                &[("dni", dni.as_str())],
                "Error al obtener las compras",
            )
            .await?;

        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body, "Error al obtener las compras"),
            });
        }

        Ok(body)
    }

    async fn points(&self, dni: &Dni) -> GatewayResult<Value> {
        let (status, body) = self
            .get_json(
                format!("{}/api/cliente/puntos", self.nasus_base),
                &[("dni", dni.as_str())],
                "Error al obtener los puntos",
            )
            .await?;

        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body, "Error al obtener los puntos"),
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_base() {
        assert_eq!(trim_base("http://auth.local/"), "http://auth.local");
        assert_eq!(trim_base("http://auth.local"), "http://auth.local");
    }

    #[test]
    fn test_upstream_message_fallback() {
        let body = json!({ "message": "Credenciales inválidas" });
        assert_eq!(
            upstream_message(&body, "Error during login"),
            "Credenciales inválidas"
        );

        let body = json!({ "unexpected": true });
        assert_eq!(
            upstream_message(&body, "Error during login"),
            "Error during login"
        );
    }
}

//! Gateway integration tests
//!
//! Drives the real router against a recorded mock backend, covering the
//! full pipeline: rate limiting, validation, upstream mapping, cookies.

pub(crate) mod support {
    use std::sync::{Arc, Mutex};

    use serde_json::{Value, json};

    use crate::domain::upstream::{
        AccessBackend, AccessReply, AuthBackend, LoginReply, PointsBackend, RegisterPayload,
        RegisterReply,
    };
    use crate::domain::value_object::{Dni, Email, OtpCode, Password};
    use crate::error::{GatewayError, GatewayResult};

    /// Upstream double: records calls, plays back configured replies.
    #[derive(Clone, Default)]
    pub struct MockBackend {
        state: Arc<Mutex<MockState>>,
        /// Token handed out when the access exchange should succeed
        access_token: Option<String>,
        /// `Mensaje` returned when the access exchange is denied
        access_message: Option<String>,
        /// Upstream rejection played back for login
        login_rejection: Option<(u16, String)>,
    }

    #[derive(Default)]
    struct MockState {
        login_calls: usize,
        login_emails: Vec<String>,
        register_payloads: Vec<RegisterPayload>,
        user_access_calls: usize,
    }

    impl MockBackend {
        pub fn with_access_granted(mut self, token: &str) -> Self {
            self.access_token = Some(token.to_string());
            self
        }

        pub fn with_access_denied(mut self, message: &str) -> Self {
            self.access_message = Some(message.to_string());
            self
        }

        pub fn with_login_rejection(mut self, status: u16, message: &str) -> Self {
            self.login_rejection = Some((status, message.to_string()));
            self
        }

        pub fn login_calls(&self) -> usize {
            self.state.lock().unwrap().login_calls
        }

        pub fn last_login_email(&self) -> Option<String> {
            self.state.lock().unwrap().login_emails.last().cloned()
        }

        pub fn register_payloads(&self) -> Vec<RegisterPayload> {
            self.state.lock().unwrap().register_payloads.clone()
        }

        pub fn user_access_calls(&self) -> usize {
            self.state.lock().unwrap().user_access_calls
        }
    }

    impl AuthBackend for MockBackend {
        async fn login(&self, email: &Email, _password: &Password) -> GatewayResult<LoginReply> {
            let mut state = self.state.lock().unwrap();
            state.login_calls += 1;
            state.login_emails.push(email.as_str().to_string());
            drop(state);

            if let Some((status, message)) = &self.login_rejection {
                return Err(GatewayError::Upstream {
                    status: *status,
                    message: message.clone(),
                });
            }

            Ok(LoginReply {
                access_token: "a".to_string(),
                refresh_token: "b".to_string(),
                user_id: "u1".to_string(),
                body: json!({
                    "accessToken": "a",
                    "refreshToken": "b",
                    "user": { "_id": "u1" }
                }),
            })
        }

        async fn register(&self, payload: &RegisterPayload) -> GatewayResult<RegisterReply> {
            self.state
                .lock()
                .unwrap()
                .register_payloads
                .push(payload.clone());

            Ok(RegisterReply {
                user_id: "u1".to_string(),
                body: json!({ "user": { "_id": "u1" } }),
            })
        }

        async fn generate_otp(&self, _email: &Email) -> GatewayResult<()> {
            Ok(())
        }

        async fn verify_otp(&self, _email: &Email, _otp: &OtpCode) -> GatewayResult<Value> {
            Ok(json!({ "resetToken": "r1" }))
        }
    }

    impl AccessBackend for MockBackend {
        async fn user_access(
            &self,
            _empresa: &str,
            _access_key: &str,
        ) -> GatewayResult<AccessReply> {
            self.state.lock().unwrap().user_access_calls += 1;

            match &self.access_token {
                Some(token) => Ok(AccessReply {
                    granted: true,
                    token: Some(token.clone()),
                    message: None,
                    body: json!({ "Estado": true, "Token": token }),
                }),
                None => Ok(AccessReply {
                    granted: false,
                    token: None,
                    message: self.access_message.clone(),
                    body: json!({ "Estado": false }),
                }),
            }
        }
    }

    impl PointsBackend for MockBackend {
        async fn purchases(&self, dni: &Dni) -> GatewayResult<Value> {
            Ok(json!({ "dni": dni.as_str(), "compras": [] }))
        }

        async fn points(&self, dni: &Dni) -> GatewayResult<Value> {
            Ok(json!({ "dni": dni.as_str(), "puntos": 0 }))
        }
    }
}

mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::MockBackend;
    use crate::application::config::GatewayConfig;
    use crate::presentation::middleware::GatewayLimiters;
    use crate::presentation::router::gateway_router_generic;

    fn app(backend: MockBackend) -> Router {
        gateway_router_generic(
            backend,
            GatewayConfig::development(),
            Arc::new(GatewayLimiters::default()),
        )
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_cookies_and_echoes_body() {
        let backend = MockBackend::default();
        let app = app(backend);

        let response = app
            .oneshot(post_json(
                "/auth/login",
                json!({ "email": "user@example.com", "password": "secret1" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();

        assert_eq!(cookies.len(), 3);
        assert!(cookies.iter().any(|c| c.starts_with("accessToken=a")));
        assert!(cookies.iter().any(|c| c.starts_with("refreshToken=b")));
        assert!(cookies.iter().any(|c| c.starts_with("userId=u1")));
        for cookie in &cookies {
            assert!(cookie.contains("HttpOnly"), "cookie not HttpOnly: {cookie}");
            assert!(cookie.contains("SameSite=Lax"));
        }

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({ "accessToken": "a", "refreshToken": "b", "user": { "_id": "u1" } })
        );
    }

    #[tokio::test]
    async fn test_login_invalid_email_is_400() {
        let response = app(MockBackend::default())
            .oneshot(post_json(
                "/auth/login",
                json!({ "email": "not-an-email", "password": "secret1" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Formato de email inválido" })
        );
    }

    #[tokio::test]
    async fn test_login_upstream_status_passthrough() {
        let backend = MockBackend::default().with_login_rejection(401, "Credenciales inválidas");

        let response = app(backend)
            .oneshot(post_json(
                "/auth/login",
                json!({ "email": "user@example.com", "password": "secret1" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Credenciales inválidas" })
        );
    }

    #[tokio::test]
    async fn test_register_forwards_normalized_fields() {
        let backend = MockBackend::default();
        let app = app(backend.clone());

        let response = app
            .oneshot(post_json(
                "/auth/register",
                json!({
                    "email": "Nueva@Example.com",
                    "password": "secret1",
                    "firstName": "maría",
                    "lastName": "GARCÍA",
                    "dni": "12.345.678",
                    "mobile": "11-4444-5555",
                    "sex": "F",
                    "birthDate": "1990-05-20"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("userId=u1"));

        let payloads = backend.register_payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].dni, "12345678");
        assert_eq!(payloads[0].email, "nueva@example.com");
        assert_eq!(payloads[0].first_name, "María");
        assert_eq!(payloads[0].last_name, "García");
        assert_eq!(payloads[0].mobile, "1144445555");
    }

    #[tokio::test]
    async fn test_register_first_invalid_field_reported() {
        let response = app(MockBackend::default())
            .oneshot(post_json(
                "/auth/register",
                json!({
                    "email": "user@example.com",
                    "password": "123",
                    "firstName": "x",
                    "lastName": "García",
                    "dni": "12345678",
                    "mobile": "1144445555"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "La contraseña debe tener al menos 6 caracteres" })
        );
    }

    #[tokio::test]
    async fn test_eleventh_login_attempt_is_rate_limited() {
        let app = app(MockBackend::default());

        for _ in 0..10 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/auth/login")
                        .header(header::CONTENT_TYPE, "application/json")
                        .header("x-forwarded-for", "203.0.113.9")
                        .body(Body::from(
                            json!({ "email": "user@example.com", "password": "secret1" })
                                .to_string(),
                        ))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header("x-forwarded-for", "203.0.113.9")
                    .body(Body::from(
                        json!({ "email": "user@example.com", "password": "secret1" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let retry_after: u64 = response
            .headers()
            .get(header::RETRY_AFTER)
            .expect("Retry-After header present")
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(retry_after > 0);

        assert_eq!(
            body_json(response).await,
            json!({ "error": "Demasiados intentos de autenticación. Intente de nuevo en 15 minutos." })
        );
    }

    #[tokio::test]
    async fn test_recovery_returns_fixed_message() {
        let response = app(MockBackend::default())
            .oneshot(post_json(
                "/auth/recovery",
                json!({ "email": "user@example.com" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Correo de recuperación enviado" })
        );
    }

    #[tokio::test]
    async fn test_verify_otp_wraps_upstream_data() {
        let response = app(MockBackend::default())
            .oneshot(post_json(
                "/auth/recovery/verifyotp",
                json!({ "email": "User@Example.com", "otp": "12-34-56" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Código OTP verificado correctamente",
                "data": { "resetToken": "r1" }
            })
        );
    }

    #[tokio::test]
    async fn test_user_access_token_cookie_short_circuits() {
        let backend = MockBackend::default();
        let app = app(backend.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/jinx/UserAccess")
                    .header(header::COOKIE, "Token=existing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Token is still valid" })
        );
        assert_eq!(backend.user_access_calls(), 0);
    }

    #[tokio::test]
    async fn test_user_access_without_key_is_401() {
        let response = app(MockBackend::default())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/jinx/UserAccess")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "AccessKey no encontrado" })
        );
    }

    #[tokio::test]
    async fn test_user_access_granted_sets_token_cookie() {
        let backend = MockBackend::default().with_access_granted("nuevo-token");

        let response = app(backend)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/jinx/UserAccess")
                    .header(header::COOKIE, "AccessKey=clave")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("Token cookie set")
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("Token=nuevo-token"));
        assert!(cookie.contains("Max-Age=21600"));
        assert!(cookie.contains("HttpOnly"));

        assert_eq!(
            body_json(response).await,
            json!({ "Estado": true, "Token": "nuevo-token" })
        );
    }

    #[tokio::test]
    async fn test_user_access_denied_is_401_with_mensaje() {
        let backend = MockBackend::default().with_access_denied("Clave vencida");

        let response = app(backend)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/jinx/UserAccess")
                    .header(header::COOKIE, "AccessKey=clave")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Clave vencida" })
        );
    }

    #[tokio::test]
    async fn test_purchases_validates_dni() {
        let app = app(MockBackend::default());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/nasus/cliente/compras?dni=123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/nasus/cliente/compras?dni=12.345.678")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "dni": "12345678", "compras": [] })
        );
    }
}

//! HTTP Handlers
//!
//! Each handler runs the fixed pipeline: rate check, parse, validate,
//! upstream call, response/cookie shaping, short-circuiting on the first
//! failure.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse, Response};
use std::sync::Arc;

use platform::cookie::{SetCookie, extract_cookie};

use crate::application::config::{
    ACCESS_KEY_COOKIE, ACCESS_TOKEN_COOKIE, GatewayConfig, REFRESH_TOKEN_COOKIE, TOKEN_COOKIE,
    USER_ID_COOKIE,
};
use crate::application::{
    LoginInput, LoginUseCase, OTP_VERIFIED_MESSAGE, PointsUseCase, RECOVERY_SENT_MESSAGE,
    RecoveryInput, RecoveryUseCase, RegisterInput, RegisterUseCase, UserAccessInput,
    UserAccessOutcome, UserAccessUseCase, VerifyOtpInput, VerifyOtpUseCase,
};
use crate::domain::upstream::{AccessBackend, AuthBackend, PointsBackend};
use crate::error::GatewayResult;
use crate::presentation::dto::{
    DniQuery, LoginRequest, MessageResponse, RecoveryRequest, RegisterRequest, VerifyOtpRequest,
    VerifyOtpResponse,
};
use crate::presentation::middleware::{GatewayLimiters, enforce};

/// Shared state for gateway handlers
#[derive(Clone)]
pub struct GatewayAppState<B>
where
    B: AuthBackend + AccessBackend + PointsBackend + Clone + Send + Sync + 'static,
{
    pub backend: Arc<B>,
    pub config: Arc<GatewayConfig>,
    pub limiters: Arc<GatewayLimiters>,
}

/// Cookie with the gateway's session policy applied.
fn session_cookie(config: &GatewayConfig, name: &str, value: &str) -> SetCookie {
    SetCookie::new(name, value)
        .secure(config.cookie_secure)
        .same_site(config.cookie_same_site)
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> GatewayResult<impl IntoResponse>
where
    B: AuthBackend + AccessBackend + PointsBackend + Clone + Send + Sync + 'static,
{
    enforce(&state.limiters.auth, &headers)?;

    let use_case = LoginUseCase::new(state.backend.clone());
    let reply = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookies = AppendHeaders([
        (
            header::SET_COOKIE,
            session_cookie(&state.config, ACCESS_TOKEN_COOKIE, &reply.access_token)
                .to_header_value(),
        ),
        (
            header::SET_COOKIE,
            session_cookie(&state.config, REFRESH_TOKEN_COOKIE, &reply.refresh_token)
                .to_header_value(),
        ),
        (
            header::SET_COOKIE,
            session_cookie(&state.config, USER_ID_COOKIE, &reply.user_id).to_header_value(),
        ),
    ]);

    Ok((StatusCode::OK, cookies, Json(reply.body)))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> GatewayResult<impl IntoResponse>
where
    B: AuthBackend + AccessBackend + PointsBackend + Clone + Send + Sync + 'static,
{
    enforce(&state.limiters.auth, &headers)?;

    let use_case = RegisterUseCase::new(state.backend.clone());
    let reply = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            dni: req.dni,
            mobile: req.mobile,
            sex: req.sex,
            birth_date: req.birth_date,
        })
        .await?;

    let cookies = AppendHeaders([(
        header::SET_COOKIE,
        session_cookie(&state.config, USER_ID_COOKIE, &reply.user_id).to_header_value(),
    )]);

    Ok((StatusCode::CREATED, cookies, Json(reply.body)))
}

// ============================================================================
// Recovery
// ============================================================================

/// POST /api/auth/recovery
pub async fn recovery<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
    Json(req): Json<RecoveryRequest>,
) -> GatewayResult<impl IntoResponse>
where
    B: AuthBackend + AccessBackend + PointsBackend + Clone + Send + Sync + 'static,
{
    enforce(&state.limiters.otp, &headers)?;

    let use_case = RecoveryUseCase::new(state.backend.clone());
    use_case.execute(RecoveryInput { email: req.email }).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new(RECOVERY_SENT_MESSAGE)),
    ))
}

/// POST /api/auth/recovery/verifyotp
pub async fn verify_otp<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
    Json(req): Json<VerifyOtpRequest>,
) -> GatewayResult<impl IntoResponse>
where
    B: AuthBackend + AccessBackend + PointsBackend + Clone + Send + Sync + 'static,
{
    enforce(&state.limiters.otp, &headers)?;

    let use_case = VerifyOtpUseCase::new(state.backend.clone());
    let data = use_case
        .execute(VerifyOtpInput {
            email: req.email,
            otp: req.otp,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(VerifyOtpResponse {
            message: OTP_VERIFIED_MESSAGE.to_string(),
            data,
        }),
    ))
}

// ============================================================================
// User Access (Jinx)
// ============================================================================

/// GET /api/jinx/UserAccess
///
/// A present `Token` cookie is trusted until its Max-Age expires; the
/// upstream is only consulted once the browser has dropped it.
pub async fn user_access<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
) -> GatewayResult<Response>
where
    B: AuthBackend + AccessBackend + PointsBackend + Clone + Send + Sync + 'static,
{
    enforce(&state.limiters.api, &headers)?;

    let use_case = UserAccessUseCase::new(state.backend.clone(), state.config.clone());
    let outcome = use_case
        .execute(UserAccessInput {
            token_cookie: extract_cookie(&headers, TOKEN_COOKIE),
            access_key_cookie: extract_cookie(&headers, ACCESS_KEY_COOKIE),
        })
        .await?;

    let response = match outcome {
        UserAccessOutcome::TokenStillValid => {
            Json(MessageResponse::new("Token is still valid")).into_response()
        }
        UserAccessOutcome::Granted { token, body } => {
            let cookie = session_cookie(&state.config, TOKEN_COOKIE, &token)
                .max_age(state.config.token_cookie_max_age_secs());

            (
                AppendHeaders([(header::SET_COOKIE, cookie.to_header_value())]),
                Json(body),
            )
                .into_response()
        }
    };

    Ok(response)
}

// ============================================================================
// Purchases / Points (Nasus)
// ============================================================================

/// GET /api/nasus/cliente/compras
pub async fn purchases<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
    Query(query): Query<DniQuery>,
) -> GatewayResult<impl IntoResponse>
where
    B: AuthBackend + AccessBackend + PointsBackend + Clone + Send + Sync + 'static,
{
    enforce(&state.limiters.api, &headers)?;

    let use_case = PointsUseCase::new(state.backend.clone());
    let body = use_case.purchases(query.dni).await?;

    Ok(Json(body))
}

/// GET /api/nasus/cliente/puntos
pub async fn points<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
    Query(query): Query<DniQuery>,
) -> GatewayResult<impl IntoResponse>
where
    B: AuthBackend + AccessBackend + PointsBackend + Clone + Send + Sync + 'static,
{
    enforce(&state.limiters.api, &headers)?;

    let use_case = PointsUseCase::new(state.backend.clone());
    let body = use_case.points(query.dni).await?;

    Ok(Json(body))
}

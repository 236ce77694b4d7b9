//! HTTP Handlers
//!
//! Each handler answers with exactly one envelope: the emitted success
//! payload, or the normalized failure via `AuthError: IntoResponse`.
//! Notifications are queued only after the response has been built.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use kernel::response::{ResponsePayload, emit};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginUseCase, Notification, NotificationDispatcher, RegisterStepOneUseCase,
    RegisterStepTwoUseCase, VerifyOtpUseCase,
};
use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    CompleteRegistrationRequest, LoginRequest, LoginResponse, RegisterRequest, UserResponse,
    VerifyOtpRequest, VerifyOtpResponse,
};
use crate::presentation::extract::ValidatedJson;
use crate::presentation::middleware::AuthContext;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub notifier: NotificationDispatcher,
}

// ============================================================================
// Register (step one)
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        RegisterStepOneUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case.execute(input).await?;

    let response = emit(
        200,
        "User created successfully",
        Some(UserResponse::from(&output.user)),
    )
    .into_response();

    state.notifier.notify(Notification::signup_code(
        &output.user,
        &output.otp_code,
        state.config.otp_ttl_minutes(),
    ));

    Ok(response)
}

// ============================================================================
// Verify OTP
// ============================================================================

/// POST /api/auth/verify-otp
pub async fn verify_otp<R>(
    State(state): State<AuthAppState<R>>,
    ValidatedJson(input): ValidatedJson<VerifyOtpRequest>,
) -> AuthResult<ResponsePayload<VerifyOtpResponse>>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = VerifyOtpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(input).await?;

    Ok(emit(
        200,
        "Verification Completed",
        Some(VerifyOtpResponse {
            user: UserResponse::from(&output.user),
            token: output.token,
        }),
    ))
}

// ============================================================================
// Register (step two)
// ============================================================================

/// POST /api/auth/register/complete
pub async fn complete_registration<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthContext,
    ValidatedJson(input): ValidatedJson<CompleteRegistrationRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        RegisterStepTwoUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case.execute(auth.user_id, input).await?;
    let user = output.user;

    let response = emit(
        200,
        "User registration completed",
        Some(UserResponse::from(&user)),
    )
    .into_response();

    if let Some(code) = output.otp_code {
        state.notifier.notify(Notification::signup_code(
            &user,
            &code,
            state.config.otp_ttl_minutes(),
        ));
    }
    state.notifier.notify(Notification::account_completed(&user));

    Ok(response)
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AuthResult<ResponsePayload<LoginResponse>>
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case.execute(input).await?;

    Ok(emit(
        200,
        "User logged in successfully",
        Some(LoginResponse {
            user: UserResponse::from(&output.user),
            token: output.token,
            expires_at: output.expires_at,
        }),
    ))
}

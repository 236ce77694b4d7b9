//! Auth Error Types
//!
//! Business violations are raised as typed variants close to where they are
//! detected. At the response boundary every variant becomes a
//! `kernel::error::failure::Failure` and goes through the normalizer.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::ApplicationError, failure::Failure, normalize::normalize,
    persistence::PersistenceError, validation::RequestValidationError,
};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// User name already registered
    #[error("User already exists")]
    UserNameTaken,

    /// No outstanding code, or the code does not match
    #[error("Invalid OTP")]
    OtpMismatch,

    #[error("OTP has expired")]
    OtpExpired,

    /// Unknown identifier or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is not verified")]
    AccountNotVerified,

    /// Bearer token missing, unknown or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    Validation(#[from] RequestValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Internal error; the message is logged, never sent
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Persistence(err.into())
    }
}

impl From<AuthError> for Failure {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNameTaken
            | AuthError::OtpMismatch
            | AuthError::OtpExpired => ApplicationError::bad_request(err.to_string()).into(),
            AuthError::InvalidCredentials
            | AuthError::AccountNotVerified
            | AuthError::SessionInvalid => ApplicationError::unauthorized(err.to_string()).into(),
            AuthError::UserNotFound => ApplicationError::not_found(err.to_string()).into(),
            AuthError::Validation(e) => Failure::Validation(e),
            AuthError::Persistence(e) => Failure::Persistence(e),
            AuthError::Application(e) => Failure::Application(e),
            AuthError::Internal(cause) => Failure::internal(cause),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        normalize(&Failure::from(self)).into_payload().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_business_errors_map_to_application_kinds() {
        let cases = [
            (AuthError::UserNameTaken, ErrorKind::BadRequest, 400),
            (AuthError::OtpMismatch, ErrorKind::BadRequest, 400),
            (AuthError::OtpExpired, ErrorKind::BadRequest, 400),
            (AuthError::InvalidCredentials, ErrorKind::Unauthorized, 401),
            (AuthError::AccountNotVerified, ErrorKind::Unauthorized, 401),
            (AuthError::UserNotFound, ErrorKind::NotFound, 404),
        ];

        for (err, kind, code) in cases {
            let message = err.to_string();
            let Failure::Application(app) = Failure::from(err) else {
                panic!("expected application failure for {message}");
            };
            assert_eq!(app.kind(), kind);
            assert_eq!(app.code(), code);
            assert_eq!(app.message(), message);
        }
    }

    #[test]
    fn test_persistence_passes_through() {
        let failure = Failure::from(AuthError::from(PersistenceError::duplicate("email", "a@b.c")));
        assert!(matches!(
            failure,
            Failure::Persistence(PersistenceError::DuplicateKeyFailure { .. })
        ));
    }

    #[test]
    fn test_internal_hides_cause() {
        let normalized = normalize(&AuthError::Internal("pool exhausted".into()).into());
        assert_eq!(normalized.status_code, 500);
        let payload = serde_json::to_value(normalized.into_payload()).unwrap();
        assert!(!payload.to_string().contains("pool exhausted"));
    }
}

//! Error conversions - From implementations for common error types
//!
//! Provides conversion from driver / library errors into the kernel error
//! types, and the HTTP response conversions (feature-gated).

use super::failure::Failure;
use super::validation::RequestValidationError;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Failure::internal(format!("I/O operation failed: {err}"))
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            Failure::Validation(RequestValidationError::single(format!(
                "JSON parse error: {err}"
            )))
        } else {
            Failure::internal(format!("JSON serialization error: {err}"))
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
mod pg {
    use sqlx::postgres::PgDatabaseError;

    use crate::error::failure::Failure;
    use crate::error::persistence::PersistenceError;

    impl From<sqlx::Error> for PersistenceError {
        fn from(err: sqlx::Error) -> Self {
            let sqlx::Error::Database(db_err) = &err else {
                return PersistenceError::Other(err.to_string());
            };

            let Some(code) = db_err.code() else {
                return PersistenceError::Other(db_err.message().to_string());
            };

            let pg = db_err.try_downcast_ref::<PgDatabaseError>();
            PersistenceError::from_sqlstate(
                &code,
                pg.and_then(|e| e.column()),
                db_err.constraint(),
                pg.and_then(|e| e.detail()),
                db_err.message(),
            )
        }
    }

    impl From<sqlx::Error> for Failure {
        fn from(err: sqlx::Error) -> Self {
            Failure::Persistence(err.into())
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
mod http_response {
    use axum::extract::rejection::JsonRejection;
    use axum::response::{IntoResponse, Response};

    use crate::error::app_error::ApplicationError;
    use crate::error::failure::Failure;
    use crate::error::normalize::normalize;
    use crate::error::validation::RequestValidationError;

    impl From<JsonRejection> for RequestValidationError {
        fn from(rejection: JsonRejection) -> Self {
            RequestValidationError::single(rejection.body_text())
        }
    }

    impl IntoResponse for Failure {
        fn into_response(self) -> Response {
            normalize(&self).into_payload().into_response()
        }
    }

    impl IntoResponse for ApplicationError {
        fn into_response(self) -> Response {
            Failure::from(self).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let failure: Failure = io_err.into();
        assert_eq!(failure.origin(), "unknown");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let failure: Failure = json_err.into();
        assert_eq!(failure.origin(), "validation");
    }
}

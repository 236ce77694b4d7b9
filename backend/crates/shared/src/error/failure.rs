//! Failure - every error source the normalizer accepts
//!
//! One variant per origin. Handlers convert their own error enums into a
//! [`Failure`] at the response boundary.

use std::borrow::Cow;

use thiserror::Error;

use super::app_error::ApplicationError;
use super::persistence::PersistenceError;
use super::validation::RequestValidationError;

/// A caught failure, tagged by origin
#[derive(Debug, Error)]
pub enum Failure {
    /// Request validation rejected the payload
    #[error("{0}")]
    Validation(#[from] RequestValidationError),

    /// Business rule violation
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Base general error (always 400)
    #[error("{0}")]
    General(Cow<'static, str>),

    /// Storage driver failure
    #[error("{0}")]
    Persistence(#[from] PersistenceError),

    /// Anything unclassified
    #[error("{}", describe_unknown(.message, .cause))]
    Unknown {
        /// Status the failure asked for, if any
        status: Option<u16>,
        /// Public message
        message: Option<String>,
        /// Diagnostic detail, logged but never sent to the client
        cause: Option<String>,
    },
}

impl Failure {
    pub fn general(message: impl Into<Cow<'static, str>>) -> Self {
        Failure::General(message.into())
    }

    /// Internal failure with a diagnostic cause and no public message
    pub fn internal(cause: impl Into<String>) -> Self {
        Failure::Unknown {
            status: None,
            message: None,
            cause: Some(cause.into()),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Failure::Unknown {
            status: Some(status),
            message: Some(message.into()),
            cause: None,
        }
    }

    /// Short origin tag for log fields
    pub fn origin(&self) -> &'static str {
        match self {
            Failure::Validation(_) => "validation",
            Failure::Application(_) => "application",
            Failure::General(_) => "general",
            Failure::Persistence(_) => "persistence",
            Failure::Unknown { .. } => "unknown",
        }
    }
}

fn describe_unknown(message: &Option<String>, cause: &Option<String>) -> String {
    match (message, cause) {
        (Some(m), Some(c)) => format!("{m} ({c})"),
        (Some(m), None) => m.clone(),
        (None, Some(c)) => c.clone(),
        (None, None) => "Unknown error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefers_message_and_cause() {
        let f = Failure::internal("connection reset");
        assert_eq!(f.to_string(), "connection reset");

        let f = Failure::with_status(418, "teapot");
        assert_eq!(f.to_string(), "teapot");
    }

    #[test]
    fn test_from_conversions() {
        let f: Failure = ApplicationError::not_found("User not found").into();
        assert_eq!(f.origin(), "application");

        let f: Failure = PersistenceError::cast("userId", "x").into();
        assert_eq!(f.origin(), "persistence");

        let f: Failure = RequestValidationError::single("bad").into();
        assert_eq!(f.origin(), "validation");
    }
}

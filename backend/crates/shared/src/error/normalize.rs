//! Error Normalizer
//!
//! Maps any [`Failure`] to a status code, a label and response details.
//! Every call writes one diagnostic log line before classifying.

use std::borrow::Cow;

use super::failure::Failure;
use super::kind::ErrorKind;
use super::persistence::PersistenceError;
use crate::response::{Details, ResponsePayload};

pub const LABEL_REQUEST_VALIDATION: &str = "Joi Validation Error";
pub const LABEL_APPLICATION: &str = "Error";
pub const LABEL_GENERAL: &str = "General Error";
pub const LABEL_STORAGE_VALIDATION: &str = "Validation Error";
pub const LABEL_CAST: &str = "Cast Error";
pub const LABEL_DUPLICATE_KEY: &str = "Duplicate key error";

/// Message used when an unclassified failure has nothing safe to show
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred";

/// Status used for conflicts reported by the storage layer
const STORAGE_CONFLICT_STATUS: u16 = 409;

/// Result of classifying a failure
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub kind: ErrorKind,
    pub status_code: u16,
    /// Label for classified failures, the failure message for the fallback
    pub label: Cow<'static, str>,
    pub details: Option<Details>,
}

impl Normalized {
    pub fn into_payload(self) -> ResponsePayload {
        ResponsePayload::error(self.status_code, self.label, self.details)
    }
}

/// Classify a failure
///
/// ```rust
/// use kernel::error::{app_error::ApplicationError, failure::Failure, normalize::normalize};
///
/// let n = normalize(&Failure::from(ApplicationError::bad_request("User already exists")));
/// assert_eq!(n.status_code, 400);
/// assert_eq!(n.label, "Error");
/// ```
pub fn normalize(failure: &Failure) -> Normalized {
    tracing::error!(origin = failure.origin(), error = %failure, "Error handler");

    match failure {
        Failure::Validation(err) => Normalized {
            kind: ErrorKind::ValidationError,
            status_code: effective_status(err.code()),
            label: Cow::Borrowed(LABEL_REQUEST_VALIDATION),
            details: Some(Details::Messages(err.messages().to_vec())),
        },

        Failure::Application(err) if err.kind().is_application() => Normalized {
            kind: err.kind(),
            status_code: effective_status(err.code()),
            label: Cow::Borrowed(LABEL_APPLICATION),
            details: Some(Details::Message(err.message().to_string())),
        },

        Failure::General(message) => Normalized {
            kind: ErrorKind::GeneralApplicationError,
            status_code: ErrorKind::GeneralApplicationError.status_code(),
            label: Cow::Borrowed(LABEL_GENERAL),
            details: Some(Details::Message(message.to_string())),
        },

        Failure::Persistence(PersistenceError::ValidationFailure { fields }) => Normalized {
            kind: ErrorKind::ValidationError,
            status_code: STORAGE_CONFLICT_STATUS,
            label: Cow::Borrowed(LABEL_STORAGE_VALIDATION),
            details: Some(Details::Messages(fields.values().cloned().collect())),
        },

        Failure::Persistence(PersistenceError::CastFailure { field, value }) => Normalized {
            kind: ErrorKind::CastError,
            status_code: STORAGE_CONFLICT_STATUS,
            label: Cow::Borrowed(LABEL_CAST),
            details: Some(Details::Message(format!("Invalid {field}: {value}"))),
        },

        Failure::Persistence(PersistenceError::DuplicateKeyFailure { conflicting }) => Normalized {
            kind: ErrorKind::DuplicateKeyError,
            status_code: STORAGE_CONFLICT_STATUS,
            label: Cow::Borrowed(LABEL_DUPLICATE_KEY),
            details: Some(Details::Fields(conflicting.clone())),
        },

        // Fallback: the failure's own status and message, if it has them.
        Failure::Application(err) => fallback(err.kind(), Some(err.code()), Some(err.message())),
        Failure::Persistence(PersistenceError::Other(_)) => {
            fallback(ErrorKind::UnknownError, None, None)
        }
        Failure::Unknown {
            status, message, ..
        } => fallback(ErrorKind::UnknownError, *status, message.as_deref()),
    }
}

fn fallback(kind: ErrorKind, status: Option<u16>, message: Option<&str>) -> Normalized {
    let status_code = status
        .map(effective_status)
        .unwrap_or(ErrorKind::UnknownError.status_code());
    let label = message
        .filter(|m| !m.is_empty())
        .map(|m| Cow::Owned(m.to_string()))
        .unwrap_or(Cow::Borrowed(GENERIC_FAILURE_MESSAGE));

    Normalized {
        kind,
        status_code,
        label,
        details: None,
    }
}

/// Caller-supplied codes outside the HTTP error range become 500
fn effective_status(code: u16) -> u16 {
    if (400..=599).contains(&code) {
        code
    } else {
        ErrorKind::UnknownError.status_code()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::error::app_error::ApplicationError;
    use crate::error::validation::RequestValidationError;

    #[test]
    fn test_request_validation() {
        let failure = Failure::from(RequestValidationError::new(vec![
            "\"email\" is required".into(),
            "\"password\" is too short".into(),
        ]));
        let n = normalize(&failure);
        assert_eq!(n.status_code, 400);
        assert_eq!(n.label, LABEL_REQUEST_VALIDATION);
        assert_eq!(
            n.details,
            Some(Details::Messages(vec![
                "\"email\" is required".into(),
                "\"password\" is too short".into()
            ]))
        );
    }

    #[test]
    fn test_request_validation_keeps_its_code() {
        let failure = Failure::from(RequestValidationError::single("bad").with_code(422));
        assert_eq!(normalize(&failure).status_code, 422);
    }

    #[test]
    fn test_application_kinds() {
        let cases = [
            (ApplicationError::bad_request("User already exists"), 400),
            (ApplicationError::unauthorized("Invalid credentials"), 401),
            (ApplicationError::insufficient_access("Admins only"), 403),
            (ApplicationError::not_found("User not found"), 404),
            (ApplicationError::application("Plan limit", 402), 402),
        ];
        for (err, code) in cases {
            let message = err.message().to_string();
            let n = normalize(&Failure::from(err));
            assert_eq!(n.status_code, code);
            assert_eq!(n.label, LABEL_APPLICATION);
            assert_eq!(n.details, Some(Details::Message(message)));
        }
    }

    #[test]
    fn test_general_error_is_fixed_400() {
        let n = normalize(&Failure::general("Something is off"));
        assert_eq!(n.status_code, 400);
        assert_eq!(n.label, LABEL_GENERAL);
        assert_eq!(n.kind, ErrorKind::GeneralApplicationError);
    }

    #[test]
    fn test_storage_validation() {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), "email is required".to_string());
        fields.insert("userName".to_string(), "userName is required".to_string());
        let n = normalize(&Failure::from(PersistenceError::ValidationFailure { fields }));
        assert_eq!(n.status_code, 409);
        assert_eq!(n.label, LABEL_STORAGE_VALIDATION);
        assert_eq!(
            n.details,
            Some(Details::Messages(vec![
                "email is required".into(),
                "userName is required".into()
            ]))
        );
    }

    #[test]
    fn test_cast_failure() {
        let n = normalize(&Failure::from(PersistenceError::cast("userId", "abc")));
        assert_eq!(n.status_code, 409);
        assert_eq!(n.label, LABEL_CAST);
        assert_eq!(n.details, Some(Details::Message("Invalid userId: abc".into())));
    }

    #[test]
    fn test_duplicate_key() {
        let n = normalize(&Failure::from(PersistenceError::duplicate("email", "a@b.c")));
        assert_eq!(n.status_code, 409);
        assert_eq!(n.kind, ErrorKind::DuplicateKeyError);
        assert_eq!(n.label, LABEL_DUPLICATE_KEY);
        let mut expected = BTreeMap::new();
        expected.insert("email".to_string(), "a@b.c".to_string());
        assert_eq!(n.details, Some(Details::Fields(expected)));
    }

    #[test]
    fn test_fallback_uses_own_status_and_message() {
        let n = normalize(&Failure::with_status(404, "No such route"));
        assert_eq!(n.status_code, 404);
        assert_eq!(n.label, "No such route");
        assert_eq!(n.details, None);
    }

    #[test]
    fn test_fallback_defaults() {
        let n = normalize(&Failure::internal("pool closed"));
        assert_eq!(n.status_code, 500);
        assert_eq!(n.label, GENERIC_FAILURE_MESSAGE);

        let n = normalize(&Failure::from(PersistenceError::Other("boom".into())));
        assert_eq!(n.status_code, 500);
        assert_eq!(n.label, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_invalid_codes_become_500() {
        let n = normalize(&Failure::from(ApplicationError::application("odd", 200)));
        assert_eq!(n.status_code, 500);

        let n = normalize(&Failure::with_status(700, "odd"));
        assert_eq!(n.status_code, 500);
    }

    #[test]
    fn test_every_kind_yields_a_known_status() {
        for kind in ErrorKind::ALL {
            let n = normalize(&Failure::from(ApplicationError::new(kind, "raised")));
            assert!(
                [400, 401, 403, 404, 409, 500].contains(&n.status_code),
                "{kind} normalized to {}",
                n.status_code
            );
        }
    }
}

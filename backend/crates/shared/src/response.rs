//! Response payload and emitter
//!
//! Every endpoint answers with the same envelope:
//! `{ status, statusCode, message, details?, data? }`.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

/// Outcome marker in the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Error details: a message, a list of messages, or a field map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Details {
    Message(String),
    Messages(Vec<String>),
    Fields(BTreeMap<String, String>),
}

/// Response envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload<T = serde_json::Value> {
    pub status: ResponseStatus,
    pub status_code: u16,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ResponsePayload {
    pub fn error(
        status_code: u16,
        message: impl Into<Cow<'static, str>>,
        details: Option<Details>,
    ) -> Self {
        Self {
            status: ResponseStatus::Error,
            status_code,
            message: message.into(),
            details,
            data: None,
        }
    }
}

/// Build the success envelope for one request
///
/// ```rust
/// use kernel::response::{emit, ResponseStatus};
///
/// let payload = emit(200, "Verification Completed", Some(serde_json::json!({"ok": true})));
/// assert_eq!(payload.status, ResponseStatus::Success);
/// assert_eq!(payload.status_code, 200);
/// ```
pub fn emit<T: Serialize>(
    status_code: u16,
    message: impl Into<Cow<'static, str>>,
    data: Option<T>,
) -> ResponsePayload<T> {
    ResponsePayload {
        status: if status_code < 400 {
            ResponseStatus::Success
        } else {
            ResponseStatus::Error
        },
        status_code,
        message: message.into(),
        details: None,
        data,
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ResponsePayload<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let payload = emit(200, "User created successfully", Some(json!({"userName": "ada"})));
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "success",
                "statusCode": 200,
                "message": "User created successfully",
                "data": {"userName": "ada"}
            })
        );
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let payload = ResponsePayload::error(
            400,
            "Error",
            Some(Details::Message("User already exists".into())),
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "error",
                "statusCode": 400,
                "message": "Error",
                "details": "User already exists"
            })
        );
    }

    #[test]
    fn test_details_shapes() {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), "a@b.c".to_string());
        assert_eq!(
            serde_json::to_value(Details::Fields(fields)).unwrap(),
            json!({"email": "a@b.c"})
        );
        assert_eq!(
            serde_json::to_value(Details::Messages(vec!["a".into(), "b".into()])).unwrap(),
            json!(["a", "b"])
        );
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = emit::<()>(201, "Created", None).into_response();
        assert_eq!(response.status().as_u16(), 201);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["statusCode"], 201);
        assert!(value.get("data").is_none());
    }
}

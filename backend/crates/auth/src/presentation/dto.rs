//! API DTOs (Data Transfer Objects)
//!
//! Request bodies deserialize leniently (every field optional) so that a
//! missing field is reported as a validation message, alongside every other
//! violated rule, instead of a bare JSON rejection.

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::error::validation::{RequestValidationError, Violations};
use serde::{Deserialize, Serialize};

use crate::application::{LoginInput, RegisterStepOneInput, RegisterStepTwoInput, VerifyOtpInput};
use crate::domain::entity::user::User;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::RawPassword,
};
use crate::presentation::extract::Validate;

const NAME_MAX_LENGTH: usize = 50;

fn required(v: &mut Violations, field: &str, value: Option<String>) -> Option<String> {
    let value = value.filter(|s| !s.trim().is_empty());
    v.check(value.is_some(), format!("\"{field}\" is required"));
    value
}

fn parsed<T>(v: &mut Violations, result: AppResult<T>) -> Option<T> {
    v.capture(result.map_err(|e| e.message().to_string()))
}

fn name(v: &mut Violations, field: &str, value: Option<String>) -> Option<String> {
    let value = required(v, field, value)?.trim().to_string();
    let ok = value.chars().count() <= NAME_MAX_LENGTH;
    v.check(
        ok,
        format!("\"{field}\" length must be less than or equal to {NAME_MAX_LENGTH} characters long"),
    );
    ok.then_some(value)
}

fn is_phone_number(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

// ============================================================================
// Register (step one)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for RegisterRequest {
    type Validated = RegisterStepOneInput;

    fn validate(self) -> Result<Self::Validated, RequestValidationError> {
        let mut v = Violations::new();

        let user_name =
            required(&mut v, "userName", self.user_name).and_then(|s| parsed(&mut v, UserName::new(s)));
        let email = required(&mut v, "email", self.email).and_then(|s| parsed(&mut v, Email::new(s)));
        let password =
            required(&mut v, "password", self.password).and_then(|s| parsed(&mut v, RawPassword::new(s)));

        let ((user_name, email), password) = v.conclude(user_name.zip(email).zip(password))?;
        Ok(RegisterStepOneInput {
            user_name,
            email,
            password,
        })
    }
}

// ============================================================================
// Verify OTP
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub code: Option<String>,
}

impl Validate for VerifyOtpRequest {
    type Validated = VerifyOtpInput;

    fn validate(self) -> Result<Self::Validated, RequestValidationError> {
        let mut v = Violations::new();

        let email = required(&mut v, "email", self.email).and_then(|s| parsed(&mut v, Email::new(s)));
        let code = required(&mut v, "code", self.code).and_then(|s| {
            let code = s.trim().to_string();
            let ok = code.len() == 6 && code.chars().all(|c| c.is_ascii_digit());
            v.check(ok, "\"code\" must be a 6 digit number");
            ok.then_some(code)
        });

        let (email, code) = v.conclude(email.zip(code))?;
        Ok(VerifyOtpInput { email, code })
    }
}

// ============================================================================
// Register (step two)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRegistrationRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl Validate for CompleteRegistrationRequest {
    type Validated = RegisterStepTwoInput;

    fn validate(self) -> Result<Self::Validated, RequestValidationError> {
        let mut v = Violations::new();

        let first_name = name(&mut v, "firstName", self.first_name);
        let last_name = name(&mut v, "lastName", self.last_name);

        // Optional fields: absent is fine, present must be valid
        let email = match self.email {
            Some(s) => parsed(&mut v, Email::new(s)).map(Some),
            None => Some(None),
        };
        let phone_number = match self.phone_number.map(|s| s.trim().to_string()) {
            Some(s) => {
                let ok = is_phone_number(&s);
                v.check(ok, "\"phoneNumber\" must be a valid phone number");
                ok.then_some(Some(s))
            }
            None => Some(None),
        };

        let (((first_name, last_name), email), phone_number) =
            v.conclude(first_name.zip(last_name).zip(email).zip(phone_number))?;
        Ok(RegisterStepTwoInput {
            first_name,
            last_name,
            email,
            phone_number,
        })
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User name or email
    pub identifier: Option<String>,
    pub password: Option<String>,
}

impl Validate for LoginRequest {
    type Validated = LoginInput;

    fn validate(self) -> Result<Self::Validated, RequestValidationError> {
        let mut v = Violations::new();

        let identifier = required(&mut v, "identifier", self.identifier);
        let password = required(&mut v, "password", self.password);

        let (identifier, password) = v.conclude(identifier.zip(password))?;
        Ok(LoginInput {
            identifier: identifier.trim().to_string(),
            password,
        })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// User record as returned to clients (no password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub status: String,
    pub email_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub profile_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            user_name: user.user_name.to_string(),
            email: user.email.to_string(),
            status: user.status.code().to_string(),
            email_verified: user.email_verified,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            profile_completed: user.profile_completed,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Verification response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_collects_every_violation() {
        let err = RegisterRequest {
            user_name: None,
            email: Some("nope".into()),
            password: Some("short".into()),
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            err.messages(),
            [
                "\"userName\" is required",
                "\"email\" must be a valid email",
                "\"password\" length must be at least 8 characters long",
            ]
        );
        assert_eq!(err.code(), 400);
    }

    #[test]
    fn test_register_valid() {
        let input = RegisterRequest {
            user_name: Some("Ada".into()),
            email: Some("Ada@Example.com".into()),
            password: Some("correct horse battery".into()),
        }
        .validate()
        .unwrap();

        assert_eq!(input.user_name.canonical(), "ada");
        assert_eq!(input.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_verify_code_format() {
        let err = VerifyOtpRequest {
            email: Some("ada@example.com".into()),
            code: Some("12ab".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.messages(), ["\"code\" must be a 6 digit number"]);
    }

    #[test]
    fn test_complete_registration_optional_fields() {
        let input = CompleteRegistrationRequest {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(input.email.is_none());
        assert!(input.phone_number.is_none());

        let err = CompleteRegistrationRequest {
            first_name: Some("Ada".into()),
            last_name: None,
            email: Some("bad".into()),
            phone_number: Some("12-34".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.messages().len(), 3);
    }

    #[test]
    fn test_user_response_omits_empty_profile() {
        let raw = RawPassword::new("correct horse battery".into()).unwrap();
        let user = User::new(
            UserName::new("ada").unwrap(),
            Email::new("ada@example.com").unwrap(),
            crate::domain::value_object::user_password::UserPassword::from_raw(&raw, None)
                .unwrap(),
        );
        let value = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(value["userName"], "ada");
        assert_eq!(value["status"], "pending");
        assert!(value.get("firstName").is_none());
        assert!(value.get("password").is_none());
    }
}

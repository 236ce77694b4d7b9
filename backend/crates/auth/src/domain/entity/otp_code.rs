//! One-time Code Entity
//!
//! Only the SHA-256 hash of the code is kept. The plain code exists once,
//! in the return value of [`OtpCode::issue`], and is handed to the mailer.

use chrono::{DateTime, Duration, Utc};
use kernel::id::OtpCodeId;
use platform::crypto;

use crate::domain::value_object::{email::Email, otp_purpose::OtpPurpose, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Number of digits in a code
pub const OTP_LENGTH: usize = 6;

#[derive(Debug, Clone)]
pub struct OtpCode {
    pub otp_id: OtpCodeId,
    pub email: Email,
    pub user_name: UserName,
    pub purpose: OtpPurpose,
    pub code_hash: Vec<u8>,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    /// Issue a fresh code, returning the entity and the plain code
    pub fn issue(
        email: Email,
        user_name: UserName,
        purpose: OtpPurpose,
        ttl: Duration,
    ) -> AuthResult<(Self, String)> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal("OTP expiry out of range".to_string()))?;
        let code = crypto::random_digits(OTP_LENGTH);

        let otp = Self {
            otp_id: OtpCodeId::new(),
            email,
            user_name,
            purpose,
            code_hash: crypto::sha256(code.as_bytes()).to_vec(),
            expires_at,
            consumed_at: None,
            created_at: now,
        };

        Ok((otp, code))
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, code: &str) -> bool {
        crypto::constant_time_eq(&crypto::sha256(code.trim().as_bytes()), &self.code_hash)
    }

    pub fn consume(&mut self) {
        self.consumed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(ttl: Duration) -> (OtpCode, String) {
        OtpCode::issue(
            Email::new("ada@example.com").unwrap(),
            UserName::new("ada").unwrap(),
            OtpPurpose::Signup,
            ttl,
        )
        .unwrap()
    }

    #[test]
    fn test_issue_stores_hash_only() {
        let (otp, code) = issue(Duration::minutes(10));
        assert_eq!(code.len(), OTP_LENGTH);
        assert_ne!(otp.code_hash, code.as_bytes());
        assert!(otp.matches(&code));
        assert!(!otp.is_expired());
        assert!(!otp.is_consumed());
    }

    #[test]
    fn test_mismatch() {
        let (otp, code) = issue(Duration::minutes(10));
        let wrong = if code == "000000" { "111111" } else { "000000" };
        assert!(!otp.matches(wrong));
    }

    #[test]
    fn test_expired() {
        let (otp, _) = issue(Duration::seconds(-1));
        assert!(otp.is_expired());
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let result = OtpCode::issue(
            Email::new("ada@example.com").unwrap(),
            UserName::new("ada").unwrap(),
            OtpPurpose::Signup,
            Duration::days(200_000_000),
        );
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[test]
    fn test_consume() {
        let (mut otp, _) = issue(Duration::minutes(10));
        otp.consume();
        assert!(otp.is_consumed());
    }
}

//! One-time Code Service
//!
//! Issues and checks email codes. Checking never mutates anything; callers
//! consume the code once their own writes have succeeded, so a failed
//! write leaves the code usable for a retry.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::otp_code::OtpCode;
use crate::domain::repository::OtpRepository;
use crate::domain::value_object::{email::Email, otp_purpose::OtpPurpose, user_name::UserName};
use crate::error::{AuthError, AuthResult};

pub struct OtpService<O>
where
    O: OtpRepository,
{
    otp_repo: Arc<O>,
    config: Arc<AuthConfig>,
}

impl<O> OtpService<O>
where
    O: OtpRepository,
{
    pub fn new(otp_repo: Arc<O>, config: Arc<AuthConfig>) -> Self {
        Self { otp_repo, config }
    }

    /// Store a fresh code and return it in plain text
    ///
    /// Older codes for the same email and purpose are superseded.
    pub async fn issue(
        &self,
        email: &Email,
        user_name: &UserName,
        purpose: OtpPurpose,
    ) -> AuthResult<String> {
        let (otp, code) = OtpCode::issue(
            email.clone(),
            user_name.clone(),
            purpose,
            self.config.otp_ttl()?,
        )?;
        self.otp_repo.create(&otp).await?;

        tracing::debug!(email = %email, purpose = %purpose, "One-time code issued");

        Ok(code)
    }

    /// Match a submitted code against the latest outstanding one
    pub async fn check(
        &self,
        email: &Email,
        purpose: OtpPurpose,
        code: &str,
    ) -> AuthResult<OtpCode> {
        let otp = self
            .otp_repo
            .find_latest(email, purpose)
            .await?
            .ok_or(AuthError::OtpMismatch)?;

        if otp.is_consumed() || !otp.matches(code) {
            return Err(AuthError::OtpMismatch);
        }

        if otp.is_expired() {
            return Err(AuthError::OtpExpired);
        }

        Ok(otp)
    }

    /// Mark a checked code as used
    pub async fn consume(&self, mut otp: OtpCode) -> AuthResult<()> {
        otp.consume();
        self.otp_repo.update(&otp).await
    }
}

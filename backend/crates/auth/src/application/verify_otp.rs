//! Verify OTP Use Case
//!
//! Proves email ownership, activates the user and opens a session.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::otp::OtpService;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, otp_purpose::OtpPurpose};
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct VerifyOtpInput {
    pub email: Email,
    pub code: String,
}

pub struct VerifyOtpOutput {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct VerifyOtpUseCase<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    otp: OtpService<O>,
    config: Arc<AuthConfig>,
}

impl<U, O, S> VerifyOtpUseCase<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        otp_repo: Arc<O>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            otp: OtpService::new(otp_repo, config.clone()),
            config,
        }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<VerifyOtpOutput> {
        let mut user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::OtpMismatch)?;

        let otp = self
            .otp
            .check(&input.email, OtpPurpose::Signup, &input.code)
            .await?;

        // User first: if this write fails the code stays usable
        user.mark_verified();
        self.user_repo.update(&user).await?;
        self.otp.consume(otp).await?;

        let (session, token) = AuthSession::issue(user.user_id, self.config.session_ttl()?)?;
        self.session_repo.create(&session).await?;

        tracing::info!(user_id = %user.user_id, "Email verified");

        Ok(VerifyOtpOutput {
            user,
            token,
            expires_at: session.expires_at,
        })
    }
}

//! Register Step Two Use Case
//!
//! Completes the profile of an authenticated user. Switching to another
//! email address sends a fresh signup code there; the account cannot log in
//! again until that code is verified.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::otp::OtpService;
use crate::domain::entity::user::User;
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::{email::Email, otp_purpose::OtpPurpose, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct RegisterStepTwoInput {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<Email>,
    pub phone_number: Option<String>,
}

pub struct RegisterStepTwoOutput {
    pub user: User,
    /// Plain code for the new address, when the email changed
    pub otp_code: Option<String>,
}

pub struct RegisterStepTwoUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    user_repo: Arc<U>,
    otp: OtpService<O>,
}

impl<U, O> RegisterStepTwoUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub fn new(user_repo: Arc<U>, otp_repo: Arc<O>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            otp: OtpService::new(otp_repo, config),
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        input: RegisterStepTwoInput,
    ) -> AuthResult<RegisterStepTwoOutput> {
        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let email_changed = user.complete_profile(
            input.first_name,
            input.last_name,
            input.email,
            input.phone_number,
        );

        // Duplicate email / phone come back as duplicate-key failures (409)
        self.user_repo.update(&user).await?;

        let otp_code = if email_changed {
            let code = self
                .otp
                .issue(&user.email, &user.user_name, OtpPurpose::Signup)
                .await?;
            tracing::info!(user_id = %user.user_id, "Email changed, verification required");
            Some(code)
        } else {
            None
        };

        tracing::info!(user_id = %user.user_id, "Profile completed");

        Ok(RegisterStepTwoOutput { user, otp_code })
    }
}

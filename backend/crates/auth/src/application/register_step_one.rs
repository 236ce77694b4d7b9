//! Register Step One Use Case
//!
//! Creates a provisional user and issues the signup code.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::otp::OtpService;
use crate::domain::entity::user::User;
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    otp_purpose::OtpPurpose,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register step one input
#[derive(Debug)]
pub struct RegisterStepOneInput {
    pub user_name: UserName,
    pub email: Email,
    pub password: RawPassword,
}

/// Register step one output
pub struct RegisterStepOneOutput {
    pub user: User,
    /// Plain code, only for the outgoing email
    pub otp_code: String,
}

pub struct RegisterStepOneUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    user_repo: Arc<U>,
    otp: OtpService<O>,
    config: Arc<AuthConfig>,
}

impl<U, O> RegisterStepOneUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub fn new(user_repo: Arc<U>, otp_repo: Arc<O>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            otp: OtpService::new(otp_repo, config.clone()),
            config,
        }
    }

    pub async fn execute(&self, input: RegisterStepOneInput) -> AuthResult<RegisterStepOneOutput> {
        // Not atomic with the insert; a concurrent duplicate hits the unique index
        if self.user_repo.exists_by_user_name(&input.user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password = UserPassword::from_raw(&input.password, self.config.pepper())?;
        let user = User::new(input.user_name, input.email, password);
        self.user_repo.create(&user).await?;

        let otp_code = self
            .otp
            .issue(&user.email, &user.user_name, OtpPurpose::Signup)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(RegisterStepOneOutput { user, otp_code })
    }
}

//! Login Use Case
//!
//! Authenticates by user name or email and opens a session.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct LoginInput {
    /// User name or email
    pub identifier: String,
    pub password: String,
}

pub struct LoginOutput {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = self
            .find_user(&input.identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // A password that fails policy can never match a stored hash
        let password = RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;
        if !user.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.can_login() {
            return Err(AuthError::AccountNotVerified);
        }

        let (session, token) = AuthSession::issue(user.user_id, self.config.session_ttl()?)?;
        self.session_repo.create(&session).await?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput {
            user,
            token,
            expires_at: session.expires_at,
        })
    }

    async fn find_user(&self, identifier: &str) -> AuthResult<Option<User>> {
        if identifier.contains('@') {
            match Email::new(identifier) {
                Ok(email) => self.user_repo.find_by_email(&email).await,
                Err(_) => Ok(None),
            }
        } else {
            match UserName::new(identifier) {
                Ok(user_name) => self.user_repo.find_by_user_name(&user_name).await,
                Err(_) => Ok(None),
            }
        }
    }
}

//! Authenticate Use Case
//!
//! Resolves a bearer token to the user it was issued for.

use std::sync::Arc;

use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> AuthenticateUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<AuthSession> {
        let session = self
            .session_repo
            .find_by_token_hash(&AuthSession::hash_token(token))
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            return Err(AuthError::SessionInvalid);
        }

        Ok(session)
    }
}

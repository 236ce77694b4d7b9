//! Auth Session Entity
//!
//! Server-side session referenced by an opaque bearer token. Only the
//! token's SHA-256 hash is persisted.

use chrono::{DateTime, Duration, Utc};
use kernel::id::AuthSessionId;
use platform::crypto;

use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Random bytes per token
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: AuthSessionId,
    pub user_id: UserId,
    pub token_hash: Vec<u8>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a session, returning it with the plain token
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn issue(user_id: UserId, ttl: Duration) -> AuthResult<(Self, String)> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal("Session expiry out of range".to_string()))?;
        let token = crypto::random_token(TOKEN_BYTES);

        let session = Self {
            session_id: AuthSessionId::new(),
            user_id,
            token_hash: Self::hash_token(&token),
            expires_at,
            created_at: now,
        };

        Ok((session, token))
    }

    pub fn hash_token(token: &str) -> Vec<u8> {
        crypto::sha256(token.as_bytes()).to_vec()
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

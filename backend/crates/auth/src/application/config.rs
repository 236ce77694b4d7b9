//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use crate::error::{AuthError, AuthResult};

/// Longest accepted code or session lifetime (one year)
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of a one-time code (10 minutes)
    pub otp_ttl: Duration,
    /// Lifetime of a bearer session (12 hours)
    pub session_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            otp_ttl: Duration::from_secs(10 * 60),
            session_ttl: Duration::from_secs(12 * 3600),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development and tests
    pub fn development() -> Self {
        Self {
            password_pepper: Some(b"development-pepper".to_vec()),
            ..Default::default()
        }
    }

    pub fn otp_ttl(&self) -> AuthResult<chrono::Duration> {
        to_chrono(self.otp_ttl)
    }

    pub fn session_ttl(&self) -> AuthResult<chrono::Duration> {
        to_chrono(self.session_ttl)
    }

    /// Code lifetime for user-facing text
    pub fn otp_ttl_minutes(&self) -> u64 {
        self.otp_ttl.as_secs() / 60
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

fn to_chrono(ttl: Duration) -> AuthResult<chrono::Duration> {
    chrono::Duration::from_std(ttl)
        .map_err(|_| AuthError::Internal(format!("TTL out of range: {}s", ttl.as_secs())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.otp_ttl().unwrap(), chrono::Duration::minutes(10));
        assert_eq!(config.session_ttl().unwrap(), chrono::Duration::hours(12));
        assert_eq!(config.otp_ttl_minutes(), 10);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_out_of_range_ttl_is_an_error() {
        let config = AuthConfig {
            otp_ttl: Duration::from_secs(100_000_000_000_000_000),
            session_ttl: Duration::from_secs(u64::MAX),
            ..Default::default()
        };
        assert!(matches!(config.otp_ttl(), Err(AuthError::Internal(_))));
        assert!(matches!(config.session_ttl(), Err(AuthError::Internal(_))));
    }

    #[test]
    fn test_max_ttl_converts() {
        let config = AuthConfig {
            otp_ttl: MAX_TTL,
            ..Default::default()
        };
        assert_eq!(config.otp_ttl().unwrap(), chrono::Duration::days(365));
    }
}

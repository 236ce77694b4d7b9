//! Server configuration from environment variables
//!
//! `.env` is loaded by `main` before [`ApiConfig::from_env`] runs.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::MAX_TTL;
use platform::aws::AwsSettings;
use secrecy::{ExposeSecret, SecretString};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_AWS_REGION: &str = "us-east-1";
const DEFAULT_SES_FROM_ADDRESS: &str = "no-reply@localhost";
const DEFAULT_OTP_TTL_SECS: u64 = 10 * 60;
const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 3600;

#[derive(Debug)]
pub struct ApiConfig {
    pub database_url: SecretString,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub aws: AwsSettings,
    pub ses_from_address: String,
    /// Topic for account events; topic notifications are dropped when unset
    pub sns_topic_arn: Option<String>,
    pub password_pepper: Option<SecretString>,
    pub otp_ttl: Duration,
    pub session_ttl: Duration,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .context("DATABASE_URL must be set in environment")?
            .into();

        let bind_addr = optional("BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = optional("FRONTEND_ORIGINS")
            .as_deref()
            .unwrap_or(DEFAULT_FRONTEND_ORIGINS)
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let aws = AwsSettings {
            region: optional("AWS_SES_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            access_key_id: optional("AWS_SES_ACCESS_KEY_ID").map(SecretString::from),
            secret_access_key: optional("AWS_SES_SECRET_ACCESS_KEY").map(SecretString::from),
        };

        let ses_from_address = optional("SES_FROM_ADDRESS").unwrap_or_else(|| {
            tracing::warn!(
                default = DEFAULT_SES_FROM_ADDRESS,
                "SES_FROM_ADDRESS not set, using default sender"
            );
            DEFAULT_SES_FROM_ADDRESS.to_string()
        });

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            aws,
            ses_from_address,
            sns_topic_arn: optional("SNS_TOPIC_ARN"),
            password_pepper: optional("PASSWORD_PEPPER").map(SecretString::from),
            otp_ttl: seconds("OTP_TTL_SECS", DEFAULT_OTP_TTL_SECS)?,
            session_ttl: seconds("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            otp_ttl: self.otp_ttl,
            session_ttl: self.session_ttl,
            password_pepper: self
                .password_pepper
                .as_ref()
                .map(|pepper| pepper.expose_secret().as_bytes().to_vec()),
        }
    }
}

/// Unset and empty are the same
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn seconds(key: &str, default: u64) -> anyhow::Result<Duration> {
    parse_ttl(key, optional(key).as_deref(), default)
}

/// Lifetime in whole seconds, between 1 and [`MAX_TTL`]
fn parse_ttl(key: &str, raw: Option<&str>, default: u64) -> anyhow::Result<Duration> {
    let secs: u64 = match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number of seconds"))?,
        None => default,
    };

    let ttl = Duration::from_secs(secs);
    if secs == 0 || ttl > MAX_TTL {
        bail!(
            "{key} must be between 1 and {} seconds (got {secs})",
            MAX_TTL.as_secs()
        );
    }
    Ok(ttl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_default_and_override() {
        assert_eq!(
            parse_ttl("OTP_TTL_SECS", None, 600).unwrap(),
            Duration::from_secs(600)
        );
        assert_eq!(
            parse_ttl("OTP_TTL_SECS", Some(" 120 "), 600).unwrap(),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn test_ttl_out_of_range_is_rejected() {
        let err = parse_ttl("SESSION_TTL_SECS", Some("100000000000000000"), 600).unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_SECS must be between"));

        assert!(parse_ttl("OTP_TTL_SECS", Some(&u64::MAX.to_string()), 600).is_err());
        assert!(parse_ttl("OTP_TTL_SECS", Some("0"), 600).is_err());
        assert!(parse_ttl("OTP_TTL_SECS", Some("soon"), 600).is_err());
        assert!(parse_ttl("OTP_TTL_SECS", Some(&MAX_TTL.as_secs().to_string()), 600).is_ok());
    }
}

//! PostgreSQL Repository Implementations
//!
//! Driver errors are converted with `AuthError::from(sqlx::Error)`, which
//! classifies constraint violations (unique, not-null, check, cast) so they
//! reach the normalizer as storage failures.

use chrono::{DateTime, Utc};
use kernel::id::{AuthSessionId, OtpCodeId};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, otp_code::OtpCode, user::User};
use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, otp_purpose::OtpPurpose, user_id::UserId, user_name::UserName,
    user_password::UserPassword, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions and spent codes
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let sessions = sqlx::query("DELETE FROM auth_sessions WHERE expires_at < now()")
            .execute(&self.pool)
            .await?
            .rows_affected();

        let codes = sqlx::query(
            "DELETE FROM otp_codes WHERE expires_at < now() OR consumed_at IS NOT NULL",
        )
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::info!(
            sessions_deleted = sessions,
            codes_deleted = codes,
            "Cleaned up expired auth records"
        );

        Ok(sessions + codes)
    }

    async fn find_user_where<T>(&self, column: &str, value: T) -> AuthResult<Option<User>>
    where
        T: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send,
    {
        let sql = format!(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                password_hash,
                user_status,
                email_verified,
                first_name,
                last_name,
                phone_number,
                profile_completed,
                created_at,
                updated_at
            FROM users
            WHERE {column} = $1
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                user_name_canonical,
                email,
                password_hash,
                user_status,
                email_verified,
                first_name,
                last_name,
                phone_number,
                profile_completed,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.status.id())
        .bind(user.email_verified)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(user.profile_completed)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        self.find_user_where("user_id", *user_id.as_uuid()).await
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        self.find_user_where("user_name_canonical", user_name.canonical())
            .await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_user_where("email", email.as_str()).await
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                user_status = $3,
                email_verified = $4,
                first_name = $5,
                last_name = $6,
                phone_number = $7,
                profile_completed = $8,
                updated_at = $9
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.status.id())
        .bind(user.email_verified)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(user.profile_completed)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// OTP Repository Implementation
// ============================================================================

impl OtpRepository for PgAuthRepository {
    async fn create(&self, otp: &OtpCode) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO otp_codes (
                otp_id,
                email,
                user_name,
                purpose,
                code_hash,
                expires_at,
                consumed_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(otp.otp_id.as_uuid())
        .bind(otp.email.as_str())
        .bind(otp.user_name.original())
        .bind(otp.purpose.code())
        .bind(&otp.code_hash)
        .bind(otp.expires_at)
        .bind(otp.consumed_at)
        .bind(otp.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_latest(
        &self,
        email: &Email,
        purpose: OtpPurpose,
    ) -> AuthResult<Option<OtpCode>> {
        let row = sqlx::query_as::<_, OtpRow>(
            r#"
            SELECT
                otp_id,
                email,
                user_name,
                purpose,
                code_hash,
                expires_at,
                consumed_at,
                created_at
            FROM otp_codes
            WHERE email = $1 AND purpose = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email.as_str())
        .bind(purpose.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(OtpRow::into_otp).transpose()
    }

    async fn update(&self, otp: &OtpCode) -> AuthResult<()> {
        sqlx::query("UPDATE otp_codes SET consumed_at = $2 WHERE otp_id = $1")
            .bind(otp.otp_id.as_uuid())
            .bind(otp.consumed_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                token_hash,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(&session.token_hash)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &[u8]) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT session_id, user_id, token_hash, expires_at, created_at
            FROM auth_sessions
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_session))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    email: String,
    password_hash: String,
    user_status: i16,
    email_verified: bool,
    first_name: Option<String>,
    last_name: Option<String>,
    phone_number: Option<String>,
    profile_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let status = UserStatus::from_id(self.user_status).ok_or_else(|| {
            AuthError::Internal(format!("Invalid user_status: {}", self.user_status))
        })?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.user_name),
            email: Email::from_db(self.email),
            password: UserPassword::from_phc_string(self.password_hash)?,
            status,
            email_verified: self.email_verified,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            profile_completed: self.profile_completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OtpRow {
    otp_id: Uuid,
    email: String,
    user_name: String,
    purpose: String,
    code_hash: Vec<u8>,
    expires_at: DateTime<Utc>,
    consumed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl OtpRow {
    fn into_otp(self) -> AuthResult<OtpCode> {
        let purpose = OtpPurpose::from_code(&self.purpose)
            .ok_or_else(|| AuthError::Internal(format!("Invalid OTP purpose: {}", self.purpose)))?;

        Ok(OtpCode {
            otp_id: OtpCodeId::from_uuid(self.otp_id),
            email: Email::from_db(self.email),
            user_name: UserName::from_db(self.user_name),
            purpose,
            code_hash: self.code_hash,
            expires_at: self.expires_at,
            consumed_at: self.consumed_at,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: Uuid,
    token_hash: Vec<u8>,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: AuthSessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            token_hash: self.token_hash,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}

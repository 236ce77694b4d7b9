//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{auth_session::AuthSession, otp_code::OtpCode, user::User};
use crate::domain::value_object::{
    email::Email, otp_purpose::OtpPurpose, user_id::UserId, user_name::UserName,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by user name (canonical comparison)
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Update user; unique collisions surface as duplicate-key failures
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// One-time code repository trait
#[trait_variant::make(OtpRepository: Send)]
pub trait LocalOtpRepository {
    /// Store a newly issued code
    async fn create(&self, otp: &OtpCode) -> AuthResult<()>;

    /// Most recently issued code for an email and purpose, consumed or not
    async fn find_latest(&self, email: &Email, purpose: OtpPurpose)
    -> AuthResult<Option<OtpCode>>;

    /// Persist consumption
    async fn update(&self, otp: &OtpCode) -> AuthResult<()>;
}

/// Auth session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by token hash
    async fn find_by_token_hash(&self, token_hash: &[u8]) -> AuthResult<Option<AuthSession>>;
}

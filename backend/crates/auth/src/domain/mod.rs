//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{auth_session::AuthSession, otp_code::OtpCode, user::User};
pub use repository::{OtpRepository, SessionRepository, UserRepository};

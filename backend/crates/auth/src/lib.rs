//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases, OTP service, notification dispatcher
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, extractors, router
//!
//! ## Flow
//! 1. `POST /register` creates a pending user and emails a 6-digit code
//! 2. `POST /verify-otp` consumes the code, activates the user, opens a session
//! 3. `POST /register/complete` (bearer session) fills in the profile
//! 4. `POST /login` authenticates by user name or email
//!
//! Every failure is converted to `kernel::error::failure::Failure` and
//! normalized into the shared response envelope.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::notification::{Notification, NotificationDispatcher};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppResult, ApplicationError},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

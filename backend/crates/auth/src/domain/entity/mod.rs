//! Entities

pub mod auth_session;
pub mod otp_code;
pub mod user;

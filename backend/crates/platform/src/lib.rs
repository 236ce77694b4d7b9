//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, random codes and tokens, Base64)
//! - Password hashing (Argon2id)
//! - Outbound notification ports (email, topic publishing)
//! - AWS SES / SNS client wrappers implementing those ports

pub mod aws;
pub mod crypto;
pub mod notify;
pub mod password;

//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - The error taxonomy and the error types raised across crates
//! - The error normalizer that turns any failure into one response shape
//! - The response payload and emitter shared by every HTTP handler
//! - Common primitive value objects (ID types)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod failure;
    pub mod kind;
    pub mod normalize;
    pub mod persistence;
    pub mod validation;
}
pub mod id;
pub mod response;

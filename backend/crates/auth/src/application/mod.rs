//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod login;
pub mod notification;
pub mod otp;
pub mod register_step_one;
pub mod register_step_two;
pub mod verify_otp;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use notification::{Notification, NotificationDispatcher};
pub use otp::OtpService;
pub use register_step_one::{RegisterStepOneInput, RegisterStepOneOutput, RegisterStepOneUseCase};
pub use register_step_two::{RegisterStepTwoInput, RegisterStepTwoOutput, RegisterStepTwoUseCase};
pub use verify_otp::{VerifyOtpInput, VerifyOtpOutput, VerifyOtpUseCase};

//! Application Layer
//!
//! Use cases, one per gateway endpoint.

pub mod config;
pub mod login;
pub mod points;
pub mod recovery;
pub mod register;
pub mod user_access;
pub mod verify_otp;

// Re-exports
pub use config::GatewayConfig;
pub use login::{LoginInput, LoginUseCase};
pub use points::PointsUseCase;
pub use recovery::{RECOVERY_SENT_MESSAGE, RecoveryInput, RecoveryUseCase};
pub use register::{RegisterInput, RegisterUseCase, validate_register};
pub use user_access::{UserAccessInput, UserAccessOutcome, UserAccessUseCase};
pub use verify_otp::{OTP_VERIFIED_MESSAGE, VerifyOtpInput, VerifyOtpUseCase};

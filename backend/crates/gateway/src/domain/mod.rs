//! Domain Layer
//!
//! Validated field value objects and upstream service contracts.

pub mod upstream;
pub mod value_object;

// Re-exports
pub use upstream::{AccessBackend, AuthBackend, PointsBackend};
pub use value_object::FieldError;

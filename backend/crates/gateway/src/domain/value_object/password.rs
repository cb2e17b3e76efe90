//! Password Value Object
//!
//! The password is forwarded to the upstream auth service untouched:
//! no trimming, no normalization. Only the length gate runs here.

use kernel::error::app_error::{AppError, AppResult};

/// Default minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Raw password, preserved byte-for-byte
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Create with the default minimum length
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        Self::with_min_length(raw, PASSWORD_MIN_LENGTH)
    }

    /// Create with an explicit minimum length
    pub fn with_min_length(raw: impl Into<String>, min_length: usize) -> AppResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(AppError::bad_request("Contraseña es requerida"));
        }

        if raw.chars().count() < min_length {
            return Err(AppError::bad_request(format!(
                "La contraseña debe tener al menos {} caracteres",
                min_length
            )));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Keep the secret out of debug output and logs.
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

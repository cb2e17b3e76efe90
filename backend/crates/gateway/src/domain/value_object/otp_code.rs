//! OTP Code Value Object
//!
//! Six-digit recovery code, normalized to digits.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Required number of digits in a recovery code
pub const OTP_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(AppError::bad_request("Código OTP es requerido"));
        }

        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != OTP_LENGTH {
            return Err(AppError::bad_request("El código OTP debe tener 6 dígitos"));
        }

        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

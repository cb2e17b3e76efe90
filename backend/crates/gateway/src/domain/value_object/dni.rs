//! DNI Value Object
//!
//! Argentine national identity number: 7 or 8 digits after stripping
//! separators. Normalized to the bare digit string.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dni(String);

impl Dni {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(AppError::bad_request("DNI es requerido"));
        }

        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if !(7..=8).contains(&digits.len()) {
            return Err(AppError::bad_request("DNI debe tener entre 7 y 8 dígitos"));
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

impl std::fmt::Display for Dni {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dni_strips_separators() {
        assert_eq!(Dni::new("123-456-7").unwrap().as_str(), "1234567");
        assert_eq!(Dni::new("12.345.678").unwrap().as_str(), "12345678");
    }

    #[test]
    fn test_dni_plain_digits() {
        assert!(Dni::new("1234567").is_ok());
        assert!(Dni::new("12345678").is_ok());
    }

    #[test]
    fn test_dni_wrong_length() {
        let err = Dni::new("123").unwrap_err();
        assert_eq!(err.message(), "DNI debe tener entre 7 y 8 dígitos");

        assert!(Dni::new("123456789").is_err());
        assert!(Dni::new("sin-digitos").is_err());
    }

    #[test]
    fn test_dni_required() {
        let err = Dni::new("").unwrap_err();
        assert_eq!(err.message(), "DNI es requerido");
    }
}

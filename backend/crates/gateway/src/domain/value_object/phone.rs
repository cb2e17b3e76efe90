//! Phone Value Object
//!
//! Mobile number normalized to digits; 10 to 15 digits accepted
//! (national numbers with or without country prefix).

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(AppError::bad_request("Teléfono es requerido"));
        }

        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if !(10..=15).contains(&digits.len()) {
            return Err(AppError::bad_request("Número de teléfono inválido"));
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

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

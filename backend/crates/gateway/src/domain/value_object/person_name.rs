//! Person Name Value Object
//!
//! First or last name: trimmed, 2 to 50 characters. Error messages carry
//! the field's display label so "Nombre" and "Apellido" report separately.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    /// Create a name, using `label` in error messages ("Nombre", "Apellido").
    pub fn new(raw: impl Into<String>, label: &str) -> AppResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(AppError::bad_request(format!("{label} es requerido")));
        }

        let trimmed = raw.trim();
        let len = trimmed.chars().count();

        if len < NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "{label} debe tener al menos {NAME_MIN_LENGTH} caracteres"
            )));
        }

        if len > NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "{label} no puede exceder {NAME_MAX_LENGTH} caracteres"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First letter upper-cased, the rest lower-cased, as the upstream
    /// auth service expects names to arrive.
    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            }
            None => String::new(),
        }
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_trims() {
        let name = PersonName::new("  Ana  ", "Nombre").unwrap();
        assert_eq!(name.as_str(), "Ana");
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(PersonName::new("Jo", "Nombre").is_ok());
        assert!(PersonName::new("a".repeat(50), "Nombre").is_ok());
        assert!(PersonName::new("a".repeat(51), "Nombre").is_err());
    }

    #[test]
    fn test_name_messages_carry_label() {
        let err = PersonName::new("", "Apellido").unwrap_err();
        assert_eq!(err.message(), "Apellido es requerido");

        let err = PersonName::new("x", "Apellido").unwrap_err();
        assert_eq!(err.message(), "Apellido debe tener al menos 2 caracteres");
    }

    #[test]
    fn test_capitalized() {
        assert_eq!(
            PersonName::new("maría", "Nombre").unwrap().capitalized(),
            "María"
        );
        assert_eq!(
            PersonName::new("GARCÍA", "Apellido").unwrap().capitalized(),
            "García"
        );
    }
}

//! Email Value Object
//!
//! Represents a validated, normalized email address.
//! Basic shape validation only - ownership is proven by the upstream
//! recovery flow, not here.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Email address value object, stored trimmed and lower-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email es requerido"));
        }

        if !Self::is_valid_format(&email) {
            return Err(AppError::bad_request("Formato de email inválido"));
        }

        Ok(Self(email))
    }

    /// `local@domain` shape: exactly one `@`, no whitespace, non-empty
    /// local part, and a dot somewhere inside the domain.
    fn is_valid_format(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let mut parts = email.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };

        if local.is_empty() {
            return false;
        }

        let domain: Vec<char> = domain.chars().collect();
        domain.len() >= 3 && domain[1..domain.len() - 1].contains(&'.')
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the normalized string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

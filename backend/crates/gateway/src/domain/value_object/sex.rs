//! Sex Value Object
//!
//! Case-insensitive member of a fixed set. The raw value is preserved
//! and forwarded upstream unmodified.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Accepted values, compared lower-cased
const ALLOWED: &[&str] = &["m", "f", "o", "masculino", "femenino", "otro"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{_0}")]
pub struct Sex(String);

impl Sex {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();

        if !ALLOWED.contains(&raw.to_lowercase().as_str()) {
            return Err(AppError::bad_request("Sexo inválido"));
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

//! Birth Date Value Object
//!
//! ISO calendar date with a coarse age gate. Age is the plain year
//! difference, not adjusted for month and day - the check is a sanity
//! bound, not an age-of-majority calculation.

use chrono::{Datelike, NaiveDate, Utc};
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const AGE_MIN: i32 = 13;
pub const AGE_MAX: i32 = 120;

/// Validated birth date. The raw input string is preserved so the value
/// forwarded upstream is exactly what the client sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    raw: String,
    date: NaiveDate,
}

impl BirthDate {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        Self::relative_to(raw, Utc::now().date_naive())
    }

    /// Validate against an explicit "today", for deterministic tests.
    pub fn relative_to(raw: impl Into<String>, today: NaiveDate) -> AppResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(AppError::bad_request("Fecha de nacimiento es requerida"));
        }

        let date = Self::parse(&raw)
            .ok_or_else(|| AppError::bad_request("Fecha de nacimiento inválida"))?;

        let age = today.year() - date.year();
        if !(AGE_MIN..=AGE_MAX).contains(&age) {
            return Err(AppError::bad_request("Edad debe estar entre 13 y 120 años"));
        }

        Ok(Self { raw, date })
    }

    /// Accepts `YYYY-MM-DD`, optionally with a time suffix (`T...`).
    fn parse(raw: &str) -> Option<NaiveDate> {
        let date_part = raw.split('T').next().unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    /// The raw input string, forwarded verbatim upstream
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl std::fmt::Display for BirthDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

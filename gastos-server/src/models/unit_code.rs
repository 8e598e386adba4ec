//! Apartment unit code validation
//!
//! Codes key the `departamento` table and are never changed after creation.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for unit codes
const MAX_UNIT_CODE_LEN: usize = 32;

/// Letters, digits, hyphens and underscores, starting with a letter or digit
static UNIT_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("invalid unit code regex")
});

/// Validated unit code (e.g. "A1", "T2-1203")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitCode(String);

impl UnitCode {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "codigo" });
        }

        if s.len() > MAX_UNIT_CODE_LEN {
            return Err(ValidationError::TooLong {
                field: "codigo",
                max: MAX_UNIT_CODE_LEN,
            });
        }

        if !UNIT_CODE_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "codigo",
                reason: "must be letters, digits, hyphens or underscores",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

//! Billing month
//!
//! Fees store their month as TEXT and the pending-fee query compares that
//! text directly, so every month written by this service uses the same
//! two-digit, zero-padded form ("01".."12").

use std::fmt;

use super::ValidationError;

/// Validated calendar month (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u8);

impl Month {
    /// Build a month from its number.
    pub fn new(number: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&number) {
            return Err(ValidationError::OutOfRange {
                field: "mes",
                min: 1,
                max: 12,
                value: i64::from(number),
            });
        }
        Ok(Self(number as u8))
    }

    /// Parse the stored representation.
    ///
    /// # Rules
    /// - Exactly two ASCII digits, zero-padded
    /// - Value between 01 and 12
    ///
    /// # Example
    /// ```
    /// use gastos_server::models::Month;
    ///
    /// assert!(Month::parse("03").is_ok());
    /// assert!(Month::parse("3").is_err());   // not zero-padded
    /// assert!(Month::parse("13").is_err());  // out of range
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "mes" });
        }

        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "mes",
                reason: "must be a two-digit month such as \"03\"",
            });
        }

        // Two ASCII digits always parse
        let number: u32 = s.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "mes",
            reason: "must be a two-digit month such as \"03\"",
        })?;
        Self::new(number)
    }

    /// Representation written to and compared against `gasto_comun.mes`.
    pub fn as_stored(self) -> String {
        format!("{:02}", self.0)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

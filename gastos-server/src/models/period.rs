//! Billing period (month + year)

use super::{Month, ValidationError};

/// Validated upper bound of a pending-fee report. The window itself is
/// applied in SQL by `FeeRepo::list_pending_until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub month: Month,
    pub year: i64,
}

impl Period {
    pub fn new(month: u32, year: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            month: Month::new(month)?,
            year,
        })
    }
}

/// Label shown in pending-fee reports, built from the stored month text.
pub fn period_label(mes: &str, anio: i64) -> String {
    format!("{}-{}", mes, anio)
}

//! Domain models with validation at construction
//!
//! User input that the storage layer compares or keys on is validated
//! when these types are built. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod month;
pub mod period;
pub mod unit_code;

pub use validation::ValidationError;
pub use month::Month;
pub use period::{period_label, Period};
pub use unit_code::UnitCode;

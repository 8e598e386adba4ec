//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - Reads return rows in insertion / key order, no pagination
//! - Mutations are one statement each (no check-then-write)
//! - Unique violations surface as `DbError::Conflict`

pub mod fees;
pub mod units;

pub use fees::{Fee, FeeRepo, NewFee};
pub use units::{NewUnit, Unit, UnitRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} '{id}' already exists")]
    Conflict { resource: &'static str, id: String },
}

//! Route handlers organized by resource

pub mod health;
pub mod gastos;
pub mod departamentos;

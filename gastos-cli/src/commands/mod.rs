//! Command implementations for the gastos CLI

pub mod depto;
pub mod serve;

pub use depto::run_depto;
pub use serve::run_serve;

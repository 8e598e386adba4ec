//! gastos-server: HTTP backend for condominium common-expense fees
//!
//! Tracks the monthly "gasto común" billed to each apartment unit,
//! registers payments and reports fees still pending up to a period.
//! Storage is a single SQLite file created on first start.

pub mod db;
pub mod http;
pub mod models;

pub use http::{router, run_server, ApiError, AppState, ServerConfig};

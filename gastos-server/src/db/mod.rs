//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool handed to handlers through `AppState`, no global handle
//! - Schema created on startup when the file or tables are absent
//! - Each mutation is a single statement, committed atomically by SQLite
//! - Unit ↔ fee relationship is a foreign-key column plus explicit queries

pub mod pool;
pub mod repos;
pub mod schema;

use std::path::Path;

pub use sqlx::SqlitePool;

pub use pool::{connect_in_memory, create_pool_with_options};
pub use repos::*;

/// Open (creating if needed) the database file and make sure both tables exist.
pub async fn open(path: &Path, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = create_pool_with_options(path, max_connections).await?;
    schema::ensure(&pool).await?;
    Ok(pool)
}

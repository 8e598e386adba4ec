//! HTTP server command
//!
//! Opens (creating if needed) the database file and serves the fee API.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gastos_server::db;
use gastos_server::http::{run_server, ServerConfig};

use crate::config::GastosConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b', env = "GASTOS_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// SQLite database file, created if absent
    #[arg(long, env = "GASTOS_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,
}

/// Settings after layering flags over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedServe {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
    pub db_path: PathBuf,
    pub max_connections: u32,
}

impl ServeArgs {
    pub fn resolve(self, config: &GastosConfig) -> ResolvedServe {
        ResolvedServe {
            bind: self.bind.unwrap_or(config.server.bind),
            cors_permissive: self.cors_permissive || config.server.cors_permissive,
            db_path: self.db_path.unwrap_or_else(|| config.database.path.clone()),
            max_connections: self
                .max_connections
                .unwrap_or(config.database.max_connections),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &GastosConfig) -> Result<()> {
    let settings = args.resolve(config);

    tracing::info!(
        db = %settings.db_path.display(),
        "Starting gastos server on {}",
        settings.bind
    );

    let pool = db::open(&settings.db_path, settings.max_connections)
        .await
        .with_context(|| format!("Failed to open database at {}", settings.db_path.display()))?;

    let server_config = ServerConfig {
        bind_addr: settings.bind,
        cors_permissive: settings.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(pool.clone(), server_config)
        .await
        .context("Server error")?;

    pool.close().await;
    Ok(())
}

//! Configuration file and the `gastos config` command
//!
//! Values are layered, highest wins:
//! 1. command-line flags
//! 2. environment (`GASTOS_BIND`, `GASTOS_DB_PATH`, also read from `.env`)
//! 3. TOML file at `$GASTOS_CONFIG` or `~/.gastos/config.toml` (optional)
//! 4. built-in defaults

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use gastos_server::db::pool::DEFAULT_MAX_CONNECTIONS;

const CONFIG_PATH_ENV: &str = "GASTOS_CONFIG";
const DEFAULT_DB_FILE: &str = "edificio_universidad.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GastosConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_FILE),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default filter when RUST_LOG is unset (e.g. "info", "gastos_server=debug")
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl GastosConfig {
    /// Load the config file, falling back to defaults when it is absent.
    ///
    /// A path named explicitly through `GASTOS_CONFIG` must exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            if env::var_os(CONFIG_PATH_ENV).is_some() {
                anyhow::bail!("Config not found at {:?} (set by {})", config_path, CONFIG_PATH_ENV);
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file (invalid TOML)")
    }

    /// Config file path: `$GASTOS_CONFIG` or `~/.gastos/config.toml`
    pub fn config_path() -> PathBuf {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gastos/config.toml")
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective file configuration as TOML
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long, short)]
        force: bool,
    },
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", GastosConfig::config_path().display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = GastosConfig::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommands::Init { force } => run_init(force),
    }
}

fn run_init(force: bool) -> Result<()> {
    let config_path = GastosConfig::config_path();

    if config_path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(&GastosConfig::default())?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Wrote {}", config_path.display());
    Ok(())
}

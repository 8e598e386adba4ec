//! gastos CLI - common-expense fee server and unit registry
//!
//! - `serve`: run the HTTP API over the building's SQLite file
//! - `depto`: register and inspect apartment units (out-of-band of HTTP)
//! - `config`: inspect or create the config file
//! - `completions`: shell completion scripts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod config;
mod tracing_setup;

use config::GastosConfig;

#[derive(Parser, Debug)]
#[command(
    name = "gastos",
    author,
    version,
    about = "Common-expense fee tracking for a residential building",
    long_about = "Serve the gastos comunes HTTP API (list fees, register payments, \
                  report pending fees) and administer the apartment units it bills."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Register and inspect apartment units
    Depto(commands::depto::DeptoArgs),
    /// Manage gastos configuration (path, show, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Only `serve` and `depto` read the config file.
    match cli.command {
        Commands::Serve(args) => {
            let cfg = load_config(cli.debug)?;
            commands::run_serve(args, &cfg).await?;
        }
        Commands::Depto(args) => {
            let cfg = load_config(cli.debug)?;
            commands::run_depto(args, &cfg).await?;
        }
        Commands::Config(args) => config::run_config(args)?,
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}

/// Load the config file and start tracing at its log level.
fn load_config(debug: bool) -> Result<GastosConfig> {
    let cfg = GastosConfig::load().context("Failed to load configuration")?;

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug,
        default_level: cfg.logging.level.clone(),
    })
    .ok();

    Ok(cfg)
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

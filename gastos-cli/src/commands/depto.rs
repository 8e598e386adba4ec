//! Apartment unit administration (`gastos depto`)
//!
//! Units are never created over HTTP; this command writes them straight
//! into the database file the server uses.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gastos_server::db::{self, DbError, FeeRepo, NewUnit, SqlitePool, Unit, UnitRepo};
use gastos_server::http::routes::departamentos::UnitResponse;
use gastos_server::http::routes::gastos::FeeResponse;
use gastos_server::models::UnitCode;

use crate::config::GastosConfig;

#[derive(Parser, Debug)]
pub struct DeptoArgs {
    /// SQLite database file (overrides config/environment)
    #[arg(long, env = "GASTOS_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: DeptoCommands,
}

#[derive(Subcommand, Debug)]
pub enum DeptoCommands {
    /// Register a new unit (codes are permanent)
    Add(AddArgs),
    /// List all units
    List,
    /// Show one unit and the fees billed to it
    Show {
        /// Unit code
        codigo: String,
    },
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Unique unit code (e.g. A1)
    #[arg(long)]
    pub codigo: String,

    /// Floor number
    #[arg(long, allow_negative_numbers = true)]
    pub piso: i64,

    /// Unit number on the floor
    #[arg(long)]
    pub numero: String,

    /// Mark the unit as occupied
    #[arg(long)]
    pub ocupado: bool,

    /// Owner RUT
    #[arg(long)]
    pub rut_propietario: Option<String>,

    /// Current status (free text)
    #[arg(long)]
    pub estado_actual: String,

    /// Tenant RUT
    #[arg(long)]
    pub rut_arrendatario: Option<String>,

    /// Lease start (YYYY-MM-DD)
    #[arg(long)]
    pub inicio_contrato: Option<NaiveDate>,

    /// Lease end (YYYY-MM-DD)
    #[arg(long)]
    pub fin_contrato: Option<NaiveDate>,

    /// Free-text comments
    #[arg(long)]
    pub comentarios: Option<String>,

    /// Number of rooms
    #[arg(long)]
    pub habitaciones: i64,

    /// Number of bathrooms
    #[arg(long)]
    pub banos: i64,
}

impl AddArgs {
    fn into_new_unit(self) -> Result<NewUnit> {
        let codigo = UnitCode::new(&self.codigo)
            .with_context(|| format!("Invalid unit code {:?}", self.codigo))?;

        Ok(NewUnit {
            codigo,
            piso: self.piso,
            numero: self.numero,
            ocupado: self.ocupado,
            rut_propietario: self.rut_propietario,
            estado_actual: self.estado_actual,
            rut_arrendatario: self.rut_arrendatario,
            inicio_contrato: self.inicio_contrato,
            fin_contrato: self.fin_contrato,
            comentarios: self.comentarios,
            habitaciones: self.habitaciones,
            banos: self.banos,
        })
    }
}

pub async fn run_depto(args: DeptoArgs, config: &GastosConfig) -> Result<()> {
    let db_path = args
        .db_path
        .unwrap_or_else(|| config.database.path.clone());
    let pool = open(&db_path).await?;

    let result = match args.command {
        DeptoCommands::Add(add) => run_add(&pool, add, args.json).await,
        DeptoCommands::List => run_list(&pool, args.json).await,
        DeptoCommands::Show { codigo } => run_show(&pool, &codigo, args.json).await,
    };

    pool.close().await;
    result
}

async fn open(path: &Path) -> Result<SqlitePool> {
    db::open(path, 1)
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))
}

async fn run_add(pool: &SqlitePool, args: AddArgs, json: bool) -> Result<()> {
    let new_unit = args.into_new_unit()?;
    let codigo = new_unit.codigo.as_str().to_owned();

    let unit = match UnitRepo::new(pool).insert(new_unit).await {
        Ok(unit) => unit,
        Err(DbError::Conflict { .. }) => {
            anyhow::bail!("Unit {codigo} already exists; unit codes cannot be reused or changed")
        }
        Err(e) => return Err(e).context("Failed to register unit"),
    };

    tracing::info!(codigo = %unit.codigo, "unit registered");

    if json {
        println!("{}", serde_json::to_string_pretty(&UnitResponse::from(unit))?);
    } else {
        println!("Registered unit {}", unit.codigo);
    }
    Ok(())
}

async fn run_list(pool: &SqlitePool, json: bool) -> Result<()> {
    let units = UnitRepo::new(pool).list().await.context("Failed to list units")?;

    if json {
        let body: Vec<UnitResponse> = units.into_iter().map(UnitResponse::from).collect();
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if units.is_empty() {
        println!("No units registered");
        return Ok(());
    }

    for unit in &units {
        println!("{}", unit_line(unit));
    }
    Ok(())
}

async fn run_show(pool: &SqlitePool, codigo: &str, json: bool) -> Result<()> {
    let unit = match UnitRepo::new(pool).get(codigo).await {
        Ok(unit) => unit,
        Err(DbError::NotFound { .. }) => anyhow::bail!("Unit {codigo} not found"),
        Err(e) => return Err(e).context("Failed to load unit"),
    };
    let fees = FeeRepo::new(pool)
        .list_for_unit(codigo)
        .await
        .context("Failed to load fees")?;

    if json {
        let body = serde_json::json!({
            "departamento": UnitResponse::from(unit),
            "gastos": fees.into_iter().map(FeeResponse::from).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{}", unit_line(&unit));
    if let Some(rut) = &unit.rut_propietario {
        println!("  propietario:  {rut}");
    }
    if let Some(rut) = &unit.rut_arrendatario {
        println!("  arrendatario: {rut}");
    }
    if let (Some(inicio), fin) = (unit.inicio_contrato, unit.fin_contrato) {
        let fin = fin.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        println!("  contrato:     {inicio} .. {fin}");
    }
    if let Some(comentarios) = &unit.comentarios {
        println!("  comentarios:  {comentarios}");
    }

    if fees.is_empty() {
        println!("  (sin gastos)");
    }
    for fee in &fees {
        let estado = match fee.fecha_pago {
            Some(fecha) if !fee.pendiente => format!("pagado {fecha}"),
            _ => "pendiente".to_string(),
        };
        println!("  {}-{}  {:>10.2}  {}", fee.mes, fee.anio, fee.monto_pagado, estado);
    }
    Ok(())
}

fn unit_line(unit: &Unit) -> String {
    format!(
        "{:<10} piso {:<3} n° {:<6} {}h/{}b  {}{}",
        unit.codigo,
        unit.piso,
        unit.numero,
        unit.habitaciones,
        unit.banos,
        unit.estado_actual,
        if unit.ocupado { " (ocupado)" } else { "" },
    )
}

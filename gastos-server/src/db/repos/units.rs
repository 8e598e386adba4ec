//! Apartment unit repository (`departamento`)
//!
//! Units are registered out-of-band and never updated: the code is the
//! primary key, and inserting an existing code is a conflict.

use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::UnitCode;

/// Unit record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Unit {
    pub codigo: String,
    pub piso: i64,
    pub numero: String,
    pub ocupado: bool,
    pub rut_propietario: Option<String>,
    pub estado_actual: String,
    pub rut_arrendatario: Option<String>,
    pub inicio_contrato: Option<NaiveDate>,
    pub fin_contrato: Option<NaiveDate>,
    pub comentarios: Option<String>,
    pub habitaciones: i64,
    pub banos: i64,
}

/// Fields supplied when registering a unit
#[derive(Debug, Clone)]
pub struct NewUnit {
    pub codigo: UnitCode,
    pub piso: i64,
    pub numero: String,
    pub ocupado: bool,
    pub rut_propietario: Option<String>,
    pub estado_actual: String,
    pub rut_arrendatario: Option<String>,
    pub inicio_contrato: Option<NaiveDate>,
    pub fin_contrato: Option<NaiveDate>,
    pub comentarios: Option<String>,
    pub habitaciones: i64,
    pub banos: i64,
}

/// Unit repository
pub struct UnitRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UnitRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a unit. Fails with `Conflict` if the code is taken.
    pub async fn insert(&self, unit: NewUnit) -> Result<Unit, DbError> {
        let result = sqlx::query_as::<_, Unit>(
            r#"
            INSERT INTO departamento (
                codigo, piso, numero, ocupado, rut_propietario, estado_actual,
                rut_arrendatario, inicio_contrato, fin_contrato, comentarios,
                habitaciones, banos
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(unit.codigo.as_str())
        .bind(unit.piso)
        .bind(&unit.numero)
        .bind(unit.ocupado)
        .bind(unit.rut_propietario.as_deref())
        .bind(&unit.estado_actual)
        .bind(unit.rut_arrendatario.as_deref())
        .bind(unit.inicio_contrato)
        .bind(unit.fin_contrato)
        .bind(unit.comentarios.as_deref())
        .bind(unit.habitaciones)
        .bind(unit.banos)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(DbError::Conflict {
                resource: "Departamento",
                id: unit.codigo.into_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// All units ordered by code.
    pub async fn list(&self) -> Result<Vec<Unit>, DbError> {
        let units = sqlx::query_as::<_, Unit>("SELECT * FROM departamento ORDER BY codigo")
            .fetch_all(self.pool)
            .await?;
        Ok(units)
    }

    /// Get a single unit by code.
    pub async fn get(&self, codigo: &str) -> Result<Unit, DbError> {
        sqlx::query_as::<_, Unit>("SELECT * FROM departamento WHERE codigo = ?")
            .bind(codigo)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "Departamento",
                id: codigo.to_owned(),
            })
    }
}

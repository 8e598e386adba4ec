//! Table definitions, created on startup when absent
//!
//! There is no migration mechanism: an existing table is left untouched
//! even if its columns differ from the ones below.

use sqlx::SqlitePool;
use tracing::info;

/// Create `departamento` and `gasto_comun` if they do not exist.
pub async fn ensure(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS departamento (
            codigo TEXT PRIMARY KEY NOT NULL,
            piso INTEGER NOT NULL,
            numero TEXT NOT NULL,
            ocupado BOOLEAN NOT NULL DEFAULT 0,
            rut_propietario TEXT,
            estado_actual TEXT NOT NULL,
            rut_arrendatario TEXT,
            inicio_contrato DATE,
            fin_contrato DATE,
            comentarios TEXT,
            habitaciones INTEGER NOT NULL,
            banos INTEGER NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS gasto_comun (
            id_gasto INTEGER PRIMARY KEY AUTOINCREMENT,
            mes TEXT NOT NULL,
            anio INTEGER NOT NULL,
            monto_pagado REAL DEFAULT 0.0,
            fecha_pago DATE,
            pendiente BOOLEAN NOT NULL DEFAULT 1,
            codigo_depto TEXT NOT NULL REFERENCES departamento(codigo),
            rut_responsable TEXT NOT NULL,
            nombre_responsable TEXT NOT NULL,
            telefono_contacto TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await?;

    info!("database schema ready");
    Ok(())
}

//! Expense fee repository (`gasto_comun`)
//!
//! - create: INSERT ... RETURNING, always pending with nothing paid
//! - register_payment: single UPDATE on the first matching fee
//! - list_pending_until: period window filter in SQL

use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::{Month, Period};

/// Columns selected for every fee read. `monto_pagado` is coalesced so it
/// is never null at read time.
const FEE_COLUMNS: &str = r#"
    id_gasto,
    mes,
    anio,
    CAST(COALESCE(monto_pagado, 0.0) AS REAL) AS monto_pagado,
    fecha_pago,
    pendiente,
    codigo_depto,
    rut_responsable,
    nombre_responsable,
    telefono_contacto
"#;

/// Fee record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Fee {
    pub id_gasto: i64,
    pub mes: String,
    pub anio: i64,
    pub monto_pagado: f64,
    pub fecha_pago: Option<NaiveDate>,
    pub pendiente: bool,
    pub codigo_depto: String,
    pub rut_responsable: String,
    pub nombre_responsable: String,
    pub telefono_contacto: String,
}

/// Fields supplied when billing a new fee
#[derive(Debug, Clone)]
pub struct NewFee {
    pub mes: Month,
    pub anio: i64,
    pub codigo_depto: String,
    pub rut_responsable: String,
    pub nombre_responsable: String,
    pub telefono_contacto: String,
}

/// Fee repository
pub struct FeeRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FeeRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All fees in insertion order.
    pub async fn list(&self) -> Result<Vec<Fee>, DbError> {
        let sql = format!("SELECT {FEE_COLUMNS} FROM gasto_comun ORDER BY id_gasto");
        let fees = sqlx::query_as::<_, Fee>(&sql).fetch_all(self.pool).await?;
        Ok(fees)
    }

    /// Fees billed to one unit, in insertion order.
    ///
    /// The unit row itself is not consulted; fees may reference a code that
    /// was never registered.
    pub async fn list_for_unit(&self, codigo_depto: &str) -> Result<Vec<Fee>, DbError> {
        let sql = format!(
            "SELECT {FEE_COLUMNS} FROM gasto_comun WHERE codigo_depto = ? ORDER BY id_gasto"
        );
        let fees = sqlx::query_as::<_, Fee>(&sql)
            .bind(codigo_depto)
            .fetch_all(self.pool)
            .await?;
        Ok(fees)
    }

    /// Insert a new pending fee: nothing paid, no payment date.
    ///
    /// Duplicates for the same (unit, month, year) are allowed.
    pub async fn create(&self, fee: NewFee) -> Result<Fee, DbError> {
        let sql = format!(
            r#"
            INSERT INTO gasto_comun (
                mes, anio, monto_pagado, fecha_pago, pendiente,
                codigo_depto, rut_responsable, nombre_responsable, telefono_contacto
            )
            VALUES (?, ?, 0.0, NULL, 1, ?, ?, ?, ?)
            RETURNING {FEE_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Fee>(&sql)
            .bind(fee.mes.as_stored())
            .bind(fee.anio)
            .bind(&fee.codigo_depto)
            .bind(&fee.rut_responsable)
            .bind(&fee.nombre_responsable)
            .bind(&fee.telefono_contacto)
            .fetch_one(self.pool)
            .await?;

        Ok(created)
    }

    /// Mark the first fee matching (unit, month, year) as paid on `fecha_pago`.
    ///
    /// `monto_pagado` is only coalesced to 0.0, never incremented. The match
    /// ignores `pendiente`, so paying twice moves the payment date.
    pub async fn register_payment(
        &self,
        codigo_depto: &str,
        mes: Month,
        anio: i64,
        fecha_pago: NaiveDate,
    ) -> Result<Fee, DbError> {
        let sql = format!(
            r#"
            UPDATE gasto_comun
            SET monto_pagado = COALESCE(monto_pagado, 0.0),
                fecha_pago = ?,
                pendiente = 0
            WHERE id_gasto = (
                SELECT id_gasto FROM gasto_comun
                WHERE codigo_depto = ? AND mes = ? AND anio = ?
                ORDER BY id_gasto
                LIMIT 1
            )
            RETURNING {FEE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Fee>(&sql)
            .bind(fecha_pago)
            .bind(codigo_depto)
            .bind(mes.as_stored())
            .bind(anio)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "Gasto",
                id: format!("{} {}-{}", codigo_depto, mes, anio),
            })
    }

    /// Pending fees billed at or before `period`.
    ///
    /// Years compare numerically; `mes` compares as stored text against the
    /// zero-padded month, which matches calendar order for every fee written
    /// through `create`.
    pub async fn list_pending_until(&self, period: Period) -> Result<Vec<Fee>, DbError> {
        let sql = format!(
            r#"
            SELECT {FEE_COLUMNS} FROM gasto_comun
            WHERE pendiente = 1
              AND (anio < ? OR (anio = ? AND mes <= ?))
            ORDER BY id_gasto
            "#
        );

        let fees = sqlx::query_as::<_, Fee>(&sql)
            .bind(period.year)
            .bind(period.year)
            .bind(period.month.as_stored())
            .fetch_all(self.pool)
            .await?;

        Ok(fees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect_in_memory, schema};

    async fn setup() -> SqlitePool {
        let pool = connect_in_memory().await.unwrap();
        schema::ensure(&pool).await.unwrap();
        pool
    }

    fn new_fee(codigo: &str, mes: u32, anio: i64) -> NewFee {
        NewFee {
            mes: Month::new(mes).unwrap(),
            anio,
            codigo_depto: codigo.to_string(),
            rut_responsable: "1-9".to_string(),
            nombre_responsable: "Ana".to_string(),
            telefono_contacto: "555".to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn created_fee_is_pending_and_unpaid() {
        let pool = setup().await;
        let fee = FeeRepo::new(&pool).create(new_fee("A1", 1, 2024)).await.unwrap();

        assert!(fee.pendiente);
        assert_eq!(fee.monto_pagado, 0.0);
        assert_eq!(fee.fecha_pago, None);
        assert_eq!(fee.mes, "01");
        assert_eq!(fee.anio, 2024);
        assert_eq!(fee.codigo_depto, "A1");
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        repo.create(new_fee("B2", 5, 2024)).await.unwrap();
        repo.create(new_fee("A1", 1, 2023)).await.unwrap();

        let fees = repo.list().await.unwrap();
        let codes: Vec<&str> = fees.iter().map(|f| f.codigo_depto.as_str()).collect();
        assert_eq!(codes, vec!["B2", "A1"]);
    }

    #[tokio::test]
    async fn duplicates_are_allowed() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        repo.create(new_fee("A1", 1, 2024)).await.unwrap();
        repo.create(new_fee("A1", 1, 2024)).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn payment_on_missing_fee_is_not_found() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        let before = repo.create(new_fee("A1", 1, 2024)).await.unwrap();

        let err = repo
            .register_payment("A1", Month::new(2).unwrap(), 2024, date("2024-02-10"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "Gasto", .. }));

        let after = repo.list().await.unwrap();
        assert_eq!(after, vec![before]);
    }

    #[tokio::test]
    async fn payment_marks_fee_paid() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        repo.create(new_fee("A1", 1, 2024)).await.unwrap();

        let paid = repo
            .register_payment("A1", Month::new(1).unwrap(), 2024, date("2024-01-15"))
            .await
            .unwrap();

        assert!(!paid.pendiente);
        assert_eq!(paid.fecha_pago, Some(date("2024-01-15")));
        assert_eq!(paid.monto_pagado, 0.0);
    }

    #[tokio::test]
    async fn payment_never_sums_amount() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        let fee = repo.create(new_fee("A1", 1, 2024)).await.unwrap();

        sqlx::query("UPDATE gasto_comun SET monto_pagado = NULL WHERE id_gasto = ?")
            .bind(fee.id_gasto)
            .execute(&pool)
            .await
            .unwrap();

        let month = Month::new(1).unwrap();
        let first = repo
            .register_payment("A1", month, 2024, date("2024-01-15"))
            .await
            .unwrap();
        let second = repo
            .register_payment("A1", month, 2024, date("2024-01-20"))
            .await
            .unwrap();

        assert_eq!(first.monto_pagado, 0.0);
        assert_eq!(second.monto_pagado, 0.0);
        assert_eq!(second.fecha_pago, Some(date("2024-01-20")));
    }

    #[tokio::test]
    async fn payment_targets_first_match_only() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        let first = repo.create(new_fee("A1", 1, 2024)).await.unwrap();
        let second = repo.create(new_fee("A1", 1, 2024)).await.unwrap();

        let paid = repo
            .register_payment("A1", Month::new(1).unwrap(), 2024, date("2024-01-15"))
            .await
            .unwrap();
        assert_eq!(paid.id_gasto, first.id_gasto);

        let pending = repo
            .list_pending_until(Period::new(1, 2024).unwrap())
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id_gasto, second.id_gasto);
    }

    #[tokio::test]
    async fn pending_window_by_period() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        repo.create(new_fee("A1", 3, 2024)).await.unwrap();
        repo.create(new_fee("A2", 9, 2024)).await.unwrap();
        repo.create(new_fee("A3", 11, 2023)).await.unwrap();
        repo.create(new_fee("A4", 1, 2025)).await.unwrap();

        let pending = repo
            .list_pending_until(Period::new(6, 2024).unwrap())
            .await
            .unwrap();
        let codes: Vec<&str> = pending.iter().map(|f| f.codigo_depto.as_str()).collect();
        assert_eq!(codes, vec!["A1", "A3"]);
    }

    #[tokio::test]
    async fn pending_compares_unpadded_months_as_text() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        repo.create(new_fee("Y", 2, 2024)).await.unwrap();

        // Rows written outside `create` may carry an unpadded month.
        sqlx::query(
            r#"
            INSERT INTO gasto_comun (
                mes, anio, monto_pagado, fecha_pago, pendiente,
                codigo_depto, rut_responsable, nombre_responsable, telefono_contacto
            )
            VALUES ('3', 2024, 0.0, NULL, 1, 'X', '1-9', 'Ana', '555')
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        // "3" > "06" as text, so March is left out of a June report.
        let pending = repo
            .list_pending_until(Period::new(6, 2024).unwrap())
            .await
            .unwrap();
        let codes: Vec<&str> = pending.iter().map(|f| f.codigo_depto.as_str()).collect();
        assert_eq!(codes, vec!["Y"]);

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].mes, "3");
    }

    #[tokio::test]
    async fn pending_excludes_paid_fees() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        repo.create(new_fee("A1", 1, 2020)).await.unwrap();
        repo.register_payment("A1", Month::new(1).unwrap(), 2020, date("2020-01-31"))
            .await
            .unwrap();

        let pending = repo
            .list_pending_until(Period::new(12, 2030).unwrap())
            .await
            .unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn list_for_unit_filters_by_code() {
        let pool = setup().await;
        let repo = FeeRepo::new(&pool);
        repo.create(new_fee("A1", 1, 2024)).await.unwrap();
        repo.create(new_fee("B2", 1, 2024)).await.unwrap();
        repo.create(new_fee("A1", 2, 2024)).await.unwrap();

        let fees = repo.list_for_unit("A1").await.unwrap();
        let months: Vec<&str> = fees.iter().map(|f| f.mes.as_str()).collect();
        assert_eq!(months, vec!["01", "02"]);
        assert!(repo.list_for_unit("Z9").await.unwrap().is_empty());
    }
}

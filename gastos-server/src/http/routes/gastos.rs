//! Common-expense fee endpoints
//!
//! - `GET  /gastos`            every fee, insertion order
//! - `POST /gastos`            bill a new pending fee
//! - `POST /gastos/pago`       mark a fee paid
//! - `GET  /gastos/pendientes` pending fees up to a month/year

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::repos::{Fee, FeeRepo, NewFee};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery};
use crate::http::server::AppState;
use crate::models::{period_label, Month, Period};

const PAYMENT_REGISTERED: &str = "El gasto ha sido registrado como pagado con éxito";
const FEE_CREATED: &str = "Gasto común registrado con éxito";

/// Create fee request
#[derive(Deserialize)]
pub struct CreateFeeRequest {
    pub mes: String,
    pub anio: i64,
    pub codigo_depto: String,
    pub rut_responsable: String,
    pub nombre_responsable: String,
    pub telefono_contacto: String,
}

/// Register payment request
#[derive(Deserialize)]
pub struct PaymentRequest {
    pub codigo_depto: String,
    pub mes: String,
    pub anio: i64,
    /// `YYYY-MM-DD`
    pub fecha_pago: NaiveDate,
}

/// Pending fee report bounds
#[derive(Deserialize)]
pub struct PendingQuery {
    pub mes: u32,
    pub anio: i64,
}

/// Fee response (all stored attributes)
#[derive(Serialize)]
pub struct FeeResponse {
    pub id_gasto: i64,
    pub mes: String,
    pub anio: i64,
    pub monto_pagado: f64,
    pub fecha_pago: Option<String>,
    pub pendiente: bool,
    pub codigo_depto: String,
    pub rut_responsable: String,
    pub nombre_responsable: String,
    pub telefono_contacto: String,
}

impl From<Fee> for FeeResponse {
    fn from(f: Fee) -> Self {
        Self {
            id_gasto: f.id_gasto,
            mes: f.mes,
            anio: f.anio,
            monto_pagado: f.monto_pagado,
            fecha_pago: f.fecha_pago.map(|d| d.format("%Y-%m-%d").to_string()),
            pendiente: f.pendiente,
            codigo_depto: f.codigo_depto,
            rut_responsable: f.rut_responsable,
            nombre_responsable: f.nombre_responsable,
            telefono_contacto: f.telefono_contacto,
        }
    }
}

/// Row of the pending fee report
#[derive(Serialize)]
pub struct PendingFeeResponse {
    pub departamento: String,
    pub periodo: String,
    pub monto: f64,
}

impl From<Fee> for PendingFeeResponse {
    fn from(f: Fee) -> Self {
        Self {
            periodo: period_label(&f.mes, f.anio),
            departamento: f.codigo_depto,
            monto: f.monto_pagado,
        }
    }
}

/// `{"mensaje": ...}` acknowledgement
#[derive(Serialize)]
pub struct MessageResponse {
    pub mensaje: &'static str,
}

/// GET /gastos - list every fee
async fn list_fees(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FeeResponse>>, ApiError> {
    let fees = FeeRepo::new(&state.pool).list().await?;
    Ok(Json(fees.into_iter().map(FeeResponse::from).collect()))
}

/// POST /gastos - bill a new fee (pending, nothing paid)
async fn create_fee(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateFeeRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let mes = Month::parse(&req.mes)?;

    let fee = FeeRepo::new(&state.pool)
        .create(NewFee {
            mes,
            anio: req.anio,
            codigo_depto: req.codigo_depto,
            rut_responsable: req.rut_responsable,
            nombre_responsable: req.nombre_responsable,
            telefono_contacto: req.telefono_contacto,
        })
        .await?;

    tracing::info!(
        id_gasto = fee.id_gasto,
        codigo_depto = %fee.codigo_depto,
        periodo = %period_label(&fee.mes, fee.anio),
        "fee created"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            mensaje: FEE_CREATED,
        }),
    ))
}

/// POST /gastos/pago - mark the matching fee as paid
async fn register_payment(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<PaymentRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mes = Month::parse(&req.mes)?;

    let fee = FeeRepo::new(&state.pool)
        .register_payment(&req.codigo_depto, mes, req.anio, req.fecha_pago)
        .await?;

    tracing::info!(
        id_gasto = fee.id_gasto,
        codigo_depto = %fee.codigo_depto,
        fecha_pago = %req.fecha_pago,
        "payment registered"
    );

    Ok(Json(MessageResponse {
        mensaje: PAYMENT_REGISTERED,
    }))
}

/// GET /gastos/pendientes?mes=&anio= - pending fees at or before the period
async fn list_pending(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<PendingQuery>,
) -> Result<Json<Vec<PendingFeeResponse>>, ApiError> {
    let period = Period::new(query.mes, query.anio)?;
    let fees = FeeRepo::new(&state.pool).list_pending_until(period).await?;
    Ok(Json(fees.into_iter().map(PendingFeeResponse::from).collect()))
}

/// Fee routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gastos", get(list_fees).post(create_fee))
        .route("/gastos/pago", post(register_payment))
        .route("/gastos/pendientes", get(list_pending))
}

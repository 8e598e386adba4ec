//! Apartment unit endpoints (read-only)
//!
//! Units are registered out-of-band. Their fees are fetched with an
//! explicit query on `gasto_comun.codigo_depto`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{FeeRepo, Unit, UnitRepo};
use crate::http::error::ApiError;
use crate::http::routes::gastos::FeeResponse;
use crate::http::server::AppState;

/// Unit response
#[derive(Serialize)]
pub struct UnitResponse {
    pub codigo: String,
    pub piso: i64,
    pub numero: String,
    pub ocupado: bool,
    pub rut_propietario: Option<String>,
    pub estado_actual: String,
    pub rut_arrendatario: Option<String>,
    pub inicio_contrato: Option<String>,
    pub fin_contrato: Option<String>,
    pub comentarios: Option<String>,
    pub habitaciones: i64,
    pub banos: i64,
}

impl From<Unit> for UnitResponse {
    fn from(u: Unit) -> Self {
        Self {
            codigo: u.codigo,
            piso: u.piso,
            numero: u.numero,
            ocupado: u.ocupado,
            rut_propietario: u.rut_propietario,
            estado_actual: u.estado_actual,
            rut_arrendatario: u.rut_arrendatario,
            inicio_contrato: u.inicio_contrato.map(|d| d.format("%Y-%m-%d").to_string()),
            fin_contrato: u.fin_contrato.map(|d| d.format("%Y-%m-%d").to_string()),
            comentarios: u.comentarios,
            habitaciones: u.habitaciones,
            banos: u.banos,
        }
    }
}

/// GET /departamentos - list all units
async fn list_units(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UnitResponse>>, ApiError> {
    let units = UnitRepo::new(&state.pool).list().await?;
    Ok(Json(units.into_iter().map(UnitResponse::from).collect()))
}

/// GET /departamentos/{codigo} - get a single unit
async fn get_unit(
    State(state): State<Arc<AppState>>,
    Path(codigo): Path<String>,
) -> Result<Json<UnitResponse>, ApiError> {
    let unit = UnitRepo::new(&state.pool).get(&codigo).await?;
    Ok(Json(UnitResponse::from(unit)))
}

/// GET /departamentos/{codigo}/gastos - fees billed to a unit
async fn list_unit_fees(
    State(state): State<Arc<AppState>>,
    Path(codigo): Path<String>,
) -> Result<Json<Vec<FeeResponse>>, ApiError> {
    let fees = FeeRepo::new(&state.pool).list_for_unit(&codigo).await?;
    Ok(Json(fees.into_iter().map(FeeResponse::from).collect()))
}

/// Unit routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/departamentos", get(list_units))
        .route("/departamentos/{codigo}", get(get_unit))
        .route("/departamentos/{codigo}/gastos", get(list_unit_fees))
}

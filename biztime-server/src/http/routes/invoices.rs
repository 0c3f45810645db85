//! Invoice endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::Deleted;
use crate::db::repos::{InvoiceRepo, InvoiceUpdate, NewInvoice};
use crate::http::error::ApiError;
use crate::http::extractors::{InvoiceId, ValidJson};
use crate::http::server::AppState;
use crate::models::validation::required;
use crate::models::{Amount, Invoice};

/// Create invoice request
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub comp_code: Option<String>,
    pub amt: Option<f64>,
    pub paid: Option<bool>,
}

/// Update invoice request; absent fields keep their value
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub amt: Option<f64>,
    pub paid: Option<bool>,
}

#[derive(Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<Invoice>,
}

#[derive(Serialize)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
}

/// GET /invoices
async fn list_invoices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InvoiceListResponse>, ApiError> {
    let invoices = InvoiceRepo::new(&state.pool).list().await?;
    Ok(Json(InvoiceListResponse { invoices }))
}

/// GET /invoices/{id}
async fn get_invoice(
    State(state): State<Arc<AppState>>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = InvoiceRepo::new(&state.pool).get(id).await?;
    Ok(Json(InvoiceResponse { invoice }))
}

/// POST /invoices
///
/// Amount is validated here so a non-positive `amt` never reaches the database.
async fn create_invoice(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    let comp_code = required(req.comp_code.as_deref(), "comp_code")?.to_owned();
    let amt = Amount::new(req.amt)?;

    let invoice = InvoiceRepo::new(&state.pool)
        .create(&NewInvoice {
            comp_code,
            amt,
            paid: req.paid.unwrap_or(false),
        })
        .await?;

    tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "Invoice created");
    Ok((StatusCode::CREATED, Json(InvoiceResponse { invoice })))
}

/// PUT /invoices/{id}
async fn update_invoice(
    State(state): State<Arc<AppState>>,
    InvoiceId(id): InvoiceId,
    ValidJson(req): ValidJson<UpdateInvoiceRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let update = InvoiceUpdate {
        amt: req.amt.map(|amt| Amount::new(Some(amt))).transpose()?,
        paid: req.paid,
    };

    let invoice = InvoiceRepo::new(&state.pool).update(id, update).await?;
    Ok(Json(InvoiceResponse { invoice }))
}

/// DELETE /invoices/{id}
async fn delete_invoice(
    State(state): State<Arc<AppState>>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<Deleted>, ApiError> {
    InvoiceRepo::new(&state.pool).delete(id).await?;

    tracing::info!(id, "Invoice deleted");
    Ok(Json(Deleted::default()))
}

/// Invoice routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
}

//! Company endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::Deleted;
use crate::db::repos::CompanyRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{Company, CompanyCode, CompanyName};

/// Create company request. Any client-supplied `code` is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Update company request; absent fields keep their value
#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
}

#[derive(Serialize)]
pub struct CompanyResponse {
    pub company: Company,
}

/// GET /companies
async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CompanyListResponse>, ApiError> {
    let companies = CompanyRepo::new(&state.pool).list().await?;
    Ok(Json(CompanyListResponse { companies }))
}

/// GET /companies/{code}
async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let company = CompanyRepo::new(&state.pool).get(&code).await?;
    Ok(Json(CompanyResponse { company }))
}

/// POST /companies - code is derived from the name
async fn create_company(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    let name = CompanyName::new(req.name.as_deref())?;
    let code = CompanyCode::from_name(&name)?;

    let company = CompanyRepo::new(&state.pool)
        .create(&code, &name, req.description.as_deref())
        .await?;

    tracing::info!(code = %company.code, "Company created");
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// PUT /companies/{code}
async fn update_company(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    ValidJson(req): ValidJson<UpdateCompanyRequest>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let name = req
        .name
        .as_deref()
        .map(|name| CompanyName::new(Some(name)))
        .transpose()?;

    let company = CompanyRepo::new(&state.pool)
        .update(&code, name.as_ref(), req.description.as_deref())
        .await?;

    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/{code} - invoices cascade
async fn delete_company(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    CompanyRepo::new(&state.pool).delete(&code).await?;

    tracing::info!(code = %code, "Company deleted");
    Ok(Json(Deleted::default()))
}

/// Company routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{code}",
            get(get_company).put(update_company).delete(delete_company),
        )
}

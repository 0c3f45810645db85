//! Industry endpoints, including industry <-> company association

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::Deleted;
use crate::db::repos::IndustryRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{Association, Industry, IndustryCode, IndustryLabel, IndustryWithCompanies};

/// Create industry request
#[derive(Debug, Deserialize)]
pub struct CreateIndustryRequest {
    pub code: Option<String>,
    pub industry: Option<String>,
}

/// Update industry request
#[derive(Debug, Deserialize)]
pub struct UpdateIndustryRequest {
    pub industry: Option<String>,
}

#[derive(Serialize)]
pub struct IndustryListResponse {
    pub industries: Vec<IndustryWithCompanies>,
}

#[derive(Serialize)]
pub struct IndustryResponse {
    pub industry: Industry,
}

#[derive(Serialize)]
pub struct AssociationResponse {
    pub association: Association,
}

/// GET /industries - each industry with its company codes
async fn list_industries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IndustryListResponse>, ApiError> {
    let industries = IndustryRepo::new(&state.pool).list().await?;
    Ok(Json(IndustryListResponse { industries }))
}

/// POST /industries
async fn create_industry(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateIndustryRequest>,
) -> Result<(StatusCode, Json<IndustryResponse>), ApiError> {
    let code = IndustryCode::new(req.code.as_deref())?;
    let label = IndustryLabel::new(req.industry.as_deref())?;

    let industry = IndustryRepo::new(&state.pool).create(&code, &label).await?;

    tracing::info!(code = %industry.code, "Industry created");
    Ok((StatusCode::CREATED, Json(IndustryResponse { industry })))
}

/// PUT /industries/{code}
async fn update_industry(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    ValidJson(req): ValidJson<UpdateIndustryRequest>,
) -> Result<Json<IndustryResponse>, ApiError> {
    let label = IndustryLabel::new(req.industry.as_deref())?;
    let industry = IndustryRepo::new(&state.pool).update(&code, &label).await?;
    Ok(Json(IndustryResponse { industry }))
}

/// DELETE /industries/{code}
async fn delete_industry(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    IndustryRepo::new(&state.pool).delete(&code).await?;

    tracing::info!(code = %code, "Industry deleted");
    Ok(Json(Deleted::default()))
}

/// POST /industries/{industry_code}/companies/{comp_code}
async fn associate_company(
    State(state): State<Arc<AppState>>,
    Path((industry_code, comp_code)): Path<(String, String)>,
) -> Result<(StatusCode, Json<AssociationResponse>), ApiError> {
    let association = IndustryRepo::new(&state.pool)
        .associate(&industry_code, &comp_code)
        .await?;

    tracing::info!(%industry_code, %comp_code, "Company associated with industry");
    Ok((StatusCode::CREATED, Json(AssociationResponse { association })))
}

/// Industry routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/industries", get(list_industries).post(create_industry))
        .route(
            "/industries/{code}",
            put(update_industry).delete(delete_industry),
        )
        .route(
            "/industries/{code}/companies/{comp_code}",
            post(associate_company),
        )
}

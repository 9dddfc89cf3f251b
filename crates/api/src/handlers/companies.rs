use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use db::filters::CompanyFilter;
use db::models::{CompanyPatch, NewCompany};
use db::repository::companies as company_repo;
use serde_json::{json, Value};
use tracing::info;

use super::AppState;
use crate::error::Result;
use crate::schema::Validate;

/// `POST /companies` → `201 { company }`
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewCompany>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    let company = company_repo::create(state.db.as_ref(), &payload).await?;
    info!(handle = %company.handle, "company created");
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// `GET /companies?nameLike=&minEmployees=&maxEmployees=` → `{ companies }`
pub async fn list(
    State(state): State<AppState>,
    filter: std::result::Result<Query<CompanyFilter>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(filter) = filter?;
    filter.validate()?;

    let companies = company_repo::find_all(state.db.as_ref(), &filter).await?;
    Ok(Json(json!({ "companies": companies })))
}

/// `GET /companies/{handle}` → `{ company }` including its jobs.
pub async fn get(
    State(state): State<AppState>,
    handle: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(handle) = handle?;
    let company = company_repo::get(state.db.as_ref(), &handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// `PATCH /companies/{handle}` → `{ company }`
pub async fn update(
    State(state): State<AppState>,
    handle: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<CompanyPatch>, JsonRejection>,
) -> Result<Json<Value>> {
    let Path(handle) = handle?;
    let Json(patch) = payload?;
    patch.validate()?;

    let company = company_repo::update(state.db.as_ref(), &handle, &patch.to_payload()).await?;
    Ok(Json(json!({ "company": company })))
}

/// `DELETE /companies/{handle}` → `{ deleted: handle }`
pub async fn remove(
    State(state): State<AppState>,
    handle: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(handle) = handle?;
    company_repo::remove(state.db.as_ref(), &handle).await?;
    info!(%handle, "company deleted");
    Ok(Json(json!({ "deleted": handle })))
}

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use db::filters::JobFilter;
use db::models::{JobPatch, NewJob};
use db::repository::jobs as job_repo;
use serde_json::{json, Value};
use tracing::info;

use super::AppState;
use crate::error::Result;
use crate::schema::Validate;

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    let job = job_repo::create(state.db.as_ref(), &payload).await?;
    info!(id = job.id, company = %job.company_handle, "job created");
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// `GET /jobs?titleLike=&minSalary=&hasEquity=` → `{ jobs }`
pub async fn list(
    State(state): State<AppState>,
    filter: std::result::Result<Query<JobFilter>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(filter) = filter?;
    filter.validate()?;

    let jobs = job_repo::find_all(state.db.as_ref(), &filter).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

pub async fn get(
    State(state): State<AppState>,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    let job = job_repo::get(state.db.as_ref(), id).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<i32>, PathRejection>,
    payload: std::result::Result<Json<JobPatch>, JsonRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    patch.validate()?;

    let job = job_repo::update(state.db.as_ref(), id, &patch.to_payload()).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    job_repo::remove(state.db.as_ref(), id).await?;
    info!(id, "job deleted");
    Ok(Json(json!({ "deleted": id })))
}

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use service::domain::{CompanyChanges, NewCompany};
use tracing::info;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCompanyInput {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[utoipa::path(
    get, path = "/companies", tag = "companies",
    responses(
        (status = 200, description = "All companies as {code, name}"),
        (status = 500, description = "Backend Unavailable", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let companies = state.companies.list_all().await?;
    info!(count = companies.len(), "list companies");
    Ok(Json(json!({ "companies": companies })))
}

#[utoipa::path(
    get, path = "/companies/{code}", tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Company with its invoices"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, path: Result<Path<String>, PathRejection>) -> Result<Json<Value>, ApiError> {
    let Path(code) = path?;
    let company = state.companies.get_by_code(&code).await?;
    Ok(Json(json!({ "company": company })))
}

#[utoipa::path(
    post, path = "/companies", tag = "companies",
    request_body = crate::openapi::CreateCompanyDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Rejected by the backend", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCompanyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    let company = state
        .companies
        .create(NewCompany { code: input.code, name: input.name, description: input.description })
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

#[utoipa::path(
    put, path = "/companies/{code}", tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    request_body = crate::openapi::UpdateCompanyDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Rejected by the backend", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateCompanyInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(code) = path?;
    let Json(input) = payload?;
    let company = state
        .companies
        .update(&code, CompanyChanges { name: input.name, description: input.description })
        .await?;
    Ok(Json(json!({ "company": company })))
}

#[utoipa::path(
    delete, path = "/companies/{code}", tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeletedDoc),
        (status = 400, description = "Company still has invoices", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, path: Result<Path<String>, PathRejection>) -> Result<Json<Value>, ApiError> {
    let Path(code) = path?;
    let deleted = state.companies.delete(&code).await?;
    Ok(Json(json!(deleted)))
}

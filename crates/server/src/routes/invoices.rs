use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use service::domain::{InvoiceUpdate, NewInvoice};
use tracing::info;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceInput {
    pub comp_code: String,
    pub amt: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceInput {
    pub amt: f64,
    #[serde(default)]
    pub paid: Option<bool>,
    /// Absent leaves the stored date alone; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub paid_date: Option<Option<NaiveDate>>,
}

fn present<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

impl From<UpdateInvoiceInput> for InvoiceUpdate {
    fn from(i: UpdateInvoiceInput) -> Self {
        InvoiceUpdate { amt: i.amt, paid: i.paid, paid_date: i.paid_date }
    }
}

#[utoipa::path(
    get, path = "/invoices", tag = "invoices",
    responses(
        (status = 200, description = "All invoices as {id, comp_code}"),
        (status = 500, description = "Backend Unavailable", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let invoices = state.invoices.list_all().await?;
    info!(count = invoices.len(), "list invoices");
    Ok(Json(json!({ "invoices": invoices })))
}

#[utoipa::path(
    get, path = "/invoices/{id}", tag = "invoices",
    params(("id" = i32, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice with its company"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, path: Result<Path<i32>, PathRejection>) -> Result<Json<Value>, ApiError> {
    let Path(id) = path?;
    let invoice = state.invoices.get_by_id(id).await?;
    Ok(Json(json!({ "invoice": invoice })))
}

#[utoipa::path(
    post, path = "/invoices", tag = "invoices",
    request_body = crate::openapi::CreateInvoiceDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Unknown company or rejected amount", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateInvoiceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    let invoice = state
        .invoices
        .create(NewInvoice { comp_code: input.comp_code, amt: input.amt })
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "invoice": invoice }))))
}

#[utoipa::path(
    put, path = "/invoices/{id}", tag = "invoices",
    params(("id" = i32, Path, description = "Invoice id")),
    request_body = crate::openapi::UpdateInvoiceDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Rejected by the backend", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateInvoiceInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let invoice = state.invoices.update(id, input.into()).await?;
    Ok(Json(json!({ "invoice": invoice })))
}

#[utoipa::path(
    delete, path = "/invoices/{id}", tag = "invoices",
    params(("id" = i32, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeletedDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, path: Result<Path<i32>, PathRejection>) -> Result<Json<Value>, ApiError> {
    let Path(id) = path?;
    let deleted = state.invoices.delete(id).await?;
    Ok(Json(json!(deleted)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_date_absent_null_and_set_are_distinct() {
        let absent: UpdateInvoiceInput = serde_json::from_str(r#"{"amt": 5}"#).unwrap();
        assert_eq!(absent.paid_date, None);
        let cleared: UpdateInvoiceInput = serde_json::from_str(r#"{"amt": 5, "paid_date": null}"#).unwrap();
        assert_eq!(cleared.paid_date, Some(None));
        let set: UpdateInvoiceInput = serde_json::from_str(r#"{"amt": 5, "paid_date": "2024-02-29"}"#).unwrap();
        assert_eq!(set.paid_date, Some(NaiveDate::from_ymd_opt(2024, 2, 29)));
    }
}

use axum::{routing::get, Json, Router};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod companies;
pub mod invoices;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:code",
            get(companies::get).put(companies::update).delete(companies::delete),
        )
        .route("/invoices", get(invoices::list).post(invoices::create))
        .route(
            "/invoices/:id",
            get(invoices::get).put(invoices::update).delete(invoices::delete),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use configs::DatabaseConfig;
    use migration::MigratorTrait;
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = models::db::connect_with_config(&DatabaseConfig::sqlite_in_memory()).await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        build_router(AppState::from_db(db), CorsLayer::very_permissive())
    }

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = call(app().await, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_company_is_201() {
        let req = json_request("POST", "/companies", serde_json::json!({"code": "acme", "name": "Acme Corp"}));
        let (status, body) = call(app().await, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["company"]["code"], "acme");
        assert!(body["company"]["description"].is_null());
    }

    #[tokio::test]
    async fn missing_required_field_is_400() {
        let req = json_request("POST", "/companies", serde_json::json!({"code": "acme"}));
        let (status, body) = call(app().await, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], 400);
        assert!(body.get("company").is_none());
    }

    #[tokio::test]
    async fn unknown_invoice_is_404() {
        let (status, body) = call(app().await, Request::get("/invoices/12").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["status"], 404);
    }

    #[tokio::test]
    async fn malformed_invoice_id_is_json_400() {
        for method in ["GET", "DELETE"] {
            let req = Request::builder().method(method).uri("/invoices/abc").body(Body::empty()).unwrap();
            let (status, body) = call(app().await, req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["status"], 400);
            assert!(body["error"]["message"].as_str().is_some_and(|m| m.contains("abc")));
        }
        let req = json_request("PUT", "/invoices/abc", serde_json::json!({"amt": 1.0}));
        let (status, body) = call(app().await, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], 400);
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let (status, body) = call(app().await, Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/companies/{code}"].is_object());
        assert!(body["paths"]["/invoices"].is_object());
        let delete_404 = &body["paths"]["/invoices/{id}"]["delete"]["responses"]["404"];
        assert_eq!(
            delete_404["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/ErrorDoc"
        );
        assert!(body["components"]["schemas"]["DeletedDoc"].is_object());
    }
}

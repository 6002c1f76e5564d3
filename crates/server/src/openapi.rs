use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CreateCompanyDoc { pub code: String, pub name: String, pub description: Option<String> }

#[derive(ToSchema)]
pub struct UpdateCompanyDoc { pub name: String, pub description: Option<String> }

#[derive(ToSchema)]
pub struct CreateInvoiceDoc { pub comp_code: String, pub amt: f64 }

#[derive(ToSchema)]
pub struct UpdateInvoiceDoc {
    pub amt: f64,
    pub paid: Option<bool>,
    /// `YYYY-MM-DD`; `null` clears the stored date.
    pub paid_date: Option<String>,
}

#[derive(ToSchema)]
pub struct DeletedDoc { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub message: String, pub status: u16 }

/// `{"error": {"message", "status"}}`, returned for every failed request.
#[derive(ToSchema)]
pub struct ErrorDoc { pub error: ErrorBodyDoc }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::get,
        crate::routes::companies::create,
        crate::routes::companies::update,
        crate::routes::companies::delete,
        crate::routes::invoices::list,
        crate::routes::invoices::get,
        crate::routes::invoices::create,
        crate::routes::invoices::update,
        crate::routes::invoices::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CreateCompanyDoc,
            UpdateCompanyDoc,
            CreateInvoiceDoc,
            UpdateInvoiceDoc,
            DeletedDoc,
            ErrorBodyDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "invoices")
    )
)]
pub struct ApiDoc;

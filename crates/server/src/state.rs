use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::{CompanyStore, InvoiceStore, SeaOrmCompanyStore, SeaOrmInvoiceStore};

/// Handler state: one handle per store, both sharing the same pool.
#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyStore>,
    pub invoices: Arc<dyn InvoiceStore>,
}

impl AppState {
    pub fn from_db(db: DatabaseConnection) -> Self {
        Self {
            companies: Arc::new(SeaOrmCompanyStore::new(db.clone())),
            invoices: Arc::new(SeaOrmInvoiceStore::new(db)),
        }
    }
}

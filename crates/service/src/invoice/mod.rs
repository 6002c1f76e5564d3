//! Invoice entity manager.

pub mod store;

pub use store::{InvoiceStore, SeaOrmInvoiceStore};

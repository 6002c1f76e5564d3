//! Relational core of the ledger: one store per entity, each issuing
//! SeaORM statements against an injected connection pool and reporting
//! outcomes through [`errors::StoreError`].
//!
//! ```
//! use service::company::{CompanyStore, SeaOrmCompanyStore};
//! use service::domain::NewCompany;
//! use migration::MigratorTrait;
//!
//! let detail = tokio_test::block_on(async {
//!     let cfg = configs::DatabaseConfig::sqlite_in_memory();
//!     let db = models::db::connect_with_config(&cfg).await?;
//!     migration::Migrator::up(&db, None).await?;
//!     let store = SeaOrmCompanyStore::new(db);
//!     store
//!         .create(NewCompany { code: "acme".into(), name: "Acme Corp".into(), description: None })
//!         .await?;
//!     Ok::<_, anyhow::Error>(store.get_by_code("acme").await?)
//! })
//! .unwrap();
//! assert!(detail.invoices.is_empty());
//! ```

pub mod errors;
pub mod domain;
pub mod company;
pub mod invoice;
#[cfg(test)]
pub mod test_support;

pub use company::{CompanyStore, SeaOrmCompanyStore};
pub use errors::StoreError;
pub use invoice::{InvoiceStore, SeaOrmInvoiceStore};

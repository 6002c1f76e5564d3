//! Company entity manager.

pub mod store;

pub use store::{CompanyStore, SeaOrmCompanyStore};

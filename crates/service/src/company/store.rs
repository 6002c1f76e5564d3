use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use tracing::{info, instrument, warn};

use models::{company, invoice};

use crate::domain::{CompanyChanges, CompanyDetail, CompanySummary, Deleted, NewCompany};
use crate::errors::StoreError;

#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// `{code, name}` for every company, ordered by code.
    async fn list_all(&self) -> Result<Vec<CompanySummary>, StoreError>;
    async fn get_by_code(&self, code: &str) -> Result<CompanyDetail, StoreError>;
    async fn create(&self, input: NewCompany) -> Result<company::Model, StoreError>;
    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<company::Model, StoreError>;
    async fn delete(&self, code: &str) -> Result<Deleted, StoreError>;
}

/// SeaORM-backed implementation. Holds a pooled connection handle.
#[derive(Clone)]
pub struct SeaOrmCompanyStore {
    db: DatabaseConnection,
}

impl SeaOrmCompanyStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CompanyStore for SeaOrmCompanyStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<CompanySummary>, StoreError> {
        company::Entity::find()
            .select_only()
            .column(company::Column::Code)
            .column(company::Column::Name)
            .order_by_asc(company::Column::Code)
            .into_model::<CompanySummary>()
            .all(&self.db)
            .await
            .map_err(StoreError::from_read)
    }

    #[instrument(skip(self))]
    async fn get_by_code(&self, code: &str) -> Result<CompanyDetail, StoreError> {
        let found = company::Entity::find_by_id(code)
            .one(&self.db)
            .await
            .map_err(StoreError::from_read)?;
        let Some(company) = found else { return Err(StoreError::not_found(code)); };

        let invoices = invoice::Entity::find()
            .inner_join(company::Entity)
            .filter(company::Column::Code.eq(code))
            .order_by_asc(invoice::Column::Id)
            .all(&self.db)
            .await
            .map_err(StoreError::from_read)?;
        Ok(CompanyDetail::new(company, invoices))
    }

    #[instrument(skip(self, input), fields(code = %input.code))]
    async fn create(&self, input: NewCompany) -> Result<company::Model, StoreError> {
        let am = company::ActiveModel {
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
        };
        match am.insert(&self.db).await {
            Ok(m) => { info!(code = %m.code, "company_created"); Ok(m) }
            Err(e) => {
                let err = StoreError::from_write(e);
                warn!(kind = err.kind(), error = %err, "company_create_rejected");
                Err(err)
            }
        }
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<company::Model, StoreError> {
        let am = company::ActiveModel {
            code: Unchanged(code.to_string()),
            name: Set(changes.name),
            description: Set(changes.description),
        };
        let updated = am.update(&self.db).await.map_err(|e| StoreError::from_update(e, code))?;
        info!(code = %updated.code, "company_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, code: &str) -> Result<Deleted, StoreError> {
        let res = company::Entity::delete_by_id(code)
            .exec(&self.db)
            .await
            .map_err(StoreError::from_write)?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found(code));
        }
        info!(%code, "company_deleted");
        Ok(Deleted::new())
    }
}

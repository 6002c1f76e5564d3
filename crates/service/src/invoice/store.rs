use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::{Set, Unchanged}, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbBackend, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::{debug, info, instrument, warn};

use models::{company, invoice};

use crate::domain::{Deleted, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
use crate::errors::StoreError;

#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// `{id, comp_code}` for every invoice, ordered by id.
    async fn list_all(&self) -> Result<Vec<InvoiceSummary>, StoreError>;
    async fn get_by_id(&self, id: i32) -> Result<InvoiceDetail, StoreError>;
    async fn create(&self, input: NewInvoice) -> Result<invoice::Model, StoreError>;
    /// Read-then-write without a transaction; concurrent updates of the same
    /// id race and the last write wins.
    async fn update(&self, id: i32, changes: InvoiceUpdate) -> Result<invoice::Model, StoreError>;
    async fn delete(&self, id: i32) -> Result<Deleted, StoreError>;
}

/// SeaORM-backed implementation. Holds a pooled connection handle.
#[derive(Clone)]
pub struct SeaOrmInvoiceStore {
    db: DatabaseConnection,
}

impl SeaOrmInvoiceStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// First phase of an update: the row as it is now.
    pub async fn read_for_update(&self, id: i32) -> Result<invoice::Model, StoreError> {
        read_row(&self.db, id, false).await
    }

    /// Second phase of an update: write every column of `current` back with
    /// `changes` applied. Fails with `NotFound` if the row disappeared since
    /// it was read.
    pub async fn write_back(&self, current: invoice::Model, changes: &InvoiceUpdate) -> Result<invoice::Model, StoreError> {
        write_row(&self.db, current, changes).await
    }

    /// Both update phases inside one transaction. On PostgreSQL the read
    /// takes a row lock (`FOR UPDATE`), so concurrent callers serialize.
    ///
    /// Inherent to the SeaORM store and not part of [`InvoiceStore`]: the
    /// trait's `update` keeps the unlocked read-then-write, and callers that
    /// need serialized updates hold a `SeaOrmInvoiceStore` directly.
    #[instrument(skip(self, changes))]
    pub async fn update_locked(&self, id: i32, changes: InvoiceUpdate) -> Result<invoice::Model, StoreError> {
        let txn = self.db.begin().await.map_err(StoreError::from_read)?;
        let current = read_row(&txn, id, true).await?;
        let updated = write_row(&txn, current, &changes).await?;
        txn.commit().await.map_err(StoreError::from_write)?;
        info!(id, amt = updated.amt, "invoice_updated_locked");
        Ok(updated)
    }
}

async fn read_row<C: ConnectionTrait>(conn: &C, id: i32, lock: bool) -> Result<invoice::Model, StoreError> {
    let mut query = invoice::Entity::find_by_id(id);
    // SQLite has no row locks; its writer lock is taken at the first write.
    if lock && conn.get_database_backend() == DbBackend::Postgres {
        query = query.lock_exclusive();
    }
    query
        .one(conn)
        .await
        .map_err(StoreError::from_read)?
        .ok_or_else(|| StoreError::not_found(id))
}

async fn write_row<C: ConnectionTrait>(conn: &C, current: invoice::Model, changes: &InvoiceUpdate) -> Result<invoice::Model, StoreError> {
    let next = changes.apply(current);
    let id = next.id;
    let am = invoice::ActiveModel {
        id: Unchanged(next.id),
        comp_code: Set(next.comp_code),
        amt: Set(next.amt),
        paid: Set(next.paid),
        add_date: Set(next.add_date),
        paid_date: Set(next.paid_date),
    };
    am.update(conn).await.map_err(|e| StoreError::from_update(e, id))
}

#[async_trait]
impl InvoiceStore for SeaOrmInvoiceStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<InvoiceSummary>, StoreError> {
        invoice::Entity::find()
            .select_only()
            .column(invoice::Column::Id)
            .column(invoice::Column::CompCode)
            .order_by_asc(invoice::Column::Id)
            .into_model::<InvoiceSummary>()
            .all(&self.db)
            .await
            .map_err(StoreError::from_read)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<InvoiceDetail, StoreError> {
        let found = invoice::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(StoreError::from_read)?;
        let Some(inv) = found else { return Err(StoreError::not_found(id)); };

        let company = company::Entity::find()
            .inner_join(invoice::Entity)
            .filter(invoice::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(StoreError::from_read)?;
        if company.is_none() {
            warn!(id, comp_code = %inv.comp_code, "invoice_company_unresolved");
        }
        Ok(InvoiceDetail::new(inv, company))
    }

    #[instrument(skip(self, input), fields(comp_code = %input.comp_code))]
    async fn create(&self, input: NewInvoice) -> Result<invoice::Model, StoreError> {
        let am = invoice::ActiveModel {
            comp_code: Set(input.comp_code),
            amt: Set(input.amt),
            ..Default::default()
        };
        match am.insert(&self.db).await {
            Ok(m) => { info!(id = m.id, comp_code = %m.comp_code, "invoice_created"); Ok(m) }
            Err(e) => {
                let err = StoreError::from_write(e);
                warn!(kind = err.kind(), error = %err, "invoice_create_rejected");
                Err(err)
            }
        }
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i32, changes: InvoiceUpdate) -> Result<invoice::Model, StoreError> {
        let current = self.read_for_update(id).await?;
        debug!(id, previous_amt = current.amt, "invoice_read_for_update");
        let updated = self.write_back(current, &changes).await?;
        info!(id, amt = updated.amt, "invoice_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<Deleted, StoreError> {
        let res = invoice::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(StoreError::from_write)?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found(id));
        }
        info!(id, "invoice_deleted");
        Ok(Deleted::new())
    }
}

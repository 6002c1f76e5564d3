//! Schema and relation checks against an in-memory SQLite database.
use anyhow::Result;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

use crate::{company, db, invoice};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = db::connect_with_config(&DatabaseConfig::sqlite_in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn insert_company(db: &DatabaseConnection, code: &str) -> Result<company::Model> {
    let am = company::ActiveModel {
        code: Set(code.to_string()),
        name: Set(format!("{code} inc")),
        description: Set(None),
    };
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn invoice_insert_takes_backend_defaults() -> Result<()> {
    let db = setup_test_db().await?;
    insert_company(&db, "ibm").await?;

    let am = invoice::ActiveModel {
        comp_code: Set("ibm".into()),
        amt: Set(250.5),
        ..Default::default()
    };
    let inv = am.insert(&db).await?;

    assert!(inv.id > 0);
    assert!(!inv.paid);
    assert!(inv.paid_date.is_none());
    assert_eq!(inv.amt, 250.5);
    Ok(())
}

#[tokio::test]
async fn relations_resolve_both_ways() -> Result<()> {
    let db = setup_test_db().await?;
    let apple = insert_company(&db, "apple").await?;
    for amt in [10.0, 20.0] {
        invoice::ActiveModel { comp_code: Set("apple".into()), amt: Set(amt), ..Default::default() }
            .insert(&db)
            .await?;
    }

    let invoices = apple.find_related(invoice::Entity).all(&db).await?;
    assert_eq!(invoices.len(), 2);

    let owner = invoices[0].find_related(company::Entity).one(&db).await?;
    assert_eq!(owner.map(|c| c.code), Some("apple".to_string()));
    Ok(())
}

#[tokio::test]
async fn foreign_key_rejects_unknown_company() -> Result<()> {
    let db = setup_test_db().await?;
    let res = invoice::ActiveModel { comp_code: Set("ghost".into()), amt: Set(1.0), ..Default::default() }
        .insert(&db)
        .await;
    assert!(res.is_err());
    Ok(())
}

#[tokio::test]
async fn foreign_key_restricts_company_delete() -> Result<()> {
    let db = setup_test_db().await?;
    insert_company(&db, "acme").await?;
    invoice::ActiveModel { comp_code: Set("acme".into()), amt: Set(5.0), ..Default::default() }
        .insert(&db)
        .await?;

    let res = company::Entity::delete_by_id("acme").exec(&db).await;
    assert!(res.is_err());
    assert!(company::Entity::find_by_id("acme").one(&db).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn negative_amount_violates_check() -> Result<()> {
    let db = setup_test_db().await?;
    insert_company(&db, "neg").await?;
    let res = invoice::ActiveModel { comp_code: Set("neg".into()), amt: Set(-1.0), ..Default::default() }
        .insert(&db)
        .await;
    assert!(res.is_err());
    Ok(())
}

#[test]
fn invoice_serializes_dates_as_iso() {
    let inv = invoice::Model {
        id: 7,
        comp_code: "acme".into(),
        amt: 100.0,
        paid: false,
        add_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        paid_date: None,
    };
    let v = serde_json::to_value(&inv).unwrap();
    assert_eq!(v["add_date"], "2024-03-01");
    assert!(v["paid_date"].is_null());
}

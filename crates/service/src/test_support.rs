#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// A fresh, migrated in-memory SQLite database. Each call gets its own
/// database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::sqlite_in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

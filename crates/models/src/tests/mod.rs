/// Connection setup against an in-memory SQLite store
pub mod db_tests;


use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// One pooled connection: every new `sqlite::memory:` connection is a fresh database.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = crate::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20260801_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260801_000001_init::Migration)]
    }
}

/// Apply all pending migrations. Single entrypoint used by the app
/// bootstrap and by integration tests.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let before = count_applied_migrations(db).await.unwrap_or(0);
    let defined = Migrator::migrations().len();
    tracing::info!("migrations: {defined} defined, {before} applied");

    Migrator::up(db, None).await?;

    let after = count_applied_migrations(db).await.unwrap_or(0);
    tracing::info!("migrations: {after} applied after up");
    Ok(())
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0), // Migration table doesn't exist yet
        Err(e) => Err(e),
    }
}

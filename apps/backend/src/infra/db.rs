//! Database connection + migration bootstrap.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Which database engine to connect to. Postgres in production; the
/// in-memory SQLite variant exists for integration tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DbKind {
    Postgres,
    SqliteMemory,
}

/// Connect without running migrations.
pub async fn connect_db(kind: DbKind, profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    match kind {
        DbKind::Postgres => {
            let url = db_url(profile, DbOwner::App)?;
            let conn = Database::connect(&url).await?;
            Ok(conn)
        }
        DbKind::SqliteMemory => {
            // A pooled in-memory SQLite gives each pooled connection its
            // own database; pin the pool to one connection so every query
            // sees the same schema.
            let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
            opts.max_connections(1)
                .connect_timeout(Duration::from_secs(5));
            let conn = Database::connect(opts).await?;
            Ok(conn)
        }
    }
}

/// Single bootstrap entrypoint: connect, then apply migrations.
pub async fn bootstrap_db(kind: DbKind, profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind, profile).await?;
    migration::migrate_up(&conn)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;
    info!(?kind, ?profile, "database ready");
    Ok(conn)
}

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::media::MediaStore;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration: token signing and password hashing
    pub security: SecurityConfig,
    /// Filesystem store for uploaded post images
    pub media: MediaStore,
}

impl AppState {
    /// Create a new AppState with the given database connection
    pub fn new(db: DatabaseConnection, security: SecurityConfig, media: MediaStore) -> Self {
        Self {
            db: Some(db),
            security,
            media,
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn new_without_db(security: SecurityConfig, media: MediaStore) -> Self {
        Self {
            db: None,
            security,
            media,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::{bootstrap_db, DbKind};
use crate::media::MediaStore;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    media: MediaStore,
    db: Option<(DbKind, DbProfile)>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            media: MediaStore::default(),
            db: None,
        }
    }

    pub fn with_db(mut self, kind: DbKind, profile: DbProfile) -> Self {
        self.db = Some((kind, profile));
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_media(mut self, media: MediaStore) -> Self {
        self.media = media;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if let Some((kind, profile)) = self.db {
            // single entrypoint: connect + migrate
            let conn = bootstrap_db(kind, profile).await?;
            Ok(AppState::new(conn, self.security_config, self.media))
        } else {
            Ok(AppState::new_without_db(self.security_config, self.media))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_succeeds_without_db_option() {
        let state = build_state().build().await.unwrap();
        assert!(state.db().is_none());
    }

    #[tokio::test]
    async fn build_with_sqlite_memory_migrates() {
        let state = build_state()
            .with_db(DbKind::SqliteMemory, DbProfile::Test)
            .build()
            .await
            .unwrap();
        assert!(state.db().is_some());
    }
}

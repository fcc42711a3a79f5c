use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::{AppState, FederationConfig, UploadConfig};
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    federation: Option<FederationConfig>,
    uploads: Option<UploadConfig>,
}

impl StateBuilder {
    pub fn new(security_config: SecurityConfig) -> Self {
        Self {
            security_config,
            db_profile: None,
            federation: None,
            uploads: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_federation(mut self, federation: FederationConfig) -> Self {
        self.federation = Some(federation);
        self
    }

    pub fn with_uploads(mut self, uploads: Option<UploadConfig>) -> Self {
        self.uploads = uploads;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let mut state = match self.db_profile {
            // single entrypoint: connect + migrate
            Some(profile) => AppState::new(bootstrap_db(profile).await?, self.security_config),
            None => AppState::new_without_db(self.security_config),
        };

        if let Some(federation) = self.federation {
            state = state.with_federation(federation);
        }
        if let Some(uploads) = self.uploads {
            state = state.with_uploads(uploads);
        }
        Ok(state)
    }
}

pub fn build_state(security_config: SecurityConfig) -> StateBuilder {
    StateBuilder::new(security_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_without_db_leaves_storage_absent() {
        let state = build_state(SecurityConfig::new(b"k".to_vec()))
            .build()
            .await
            .unwrap();
        assert!(state.db().is_none());
        assert!(state.federation.is_none());
        assert!(state.uploads.is_none());
    }

    #[tokio::test]
    async fn build_with_in_memory_db() {
        let state = build_state(SecurityConfig::new(b"k".to_vec()))
            .with_db(DbProfile::InMemory)
            .build()
            .await
            .unwrap();
        assert!(state.db().is_some());
    }
}

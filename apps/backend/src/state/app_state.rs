use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::federation::IdTokenVerifier;
use crate::services::uploads::UploadSigner;

/// Identity provider used at login, plus the audience its tokens must carry.
#[derive(Debug, Clone)]
pub struct FederationConfig {
    pub verifier: Arc<dyn IdTokenVerifier>,
    pub audience: String,
}

/// Presigner and target bucket for image uploads.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub signer: Arc<dyn UploadSigner>,
    pub bucket: String,
}

/// Shared, immutable application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in tests that must never touch storage)
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub federation: Option<FederationConfig>,
    pub uploads: Option<UploadConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            federation: None,
            uploads: None,
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            federation: None,
            uploads: None,
        }
    }

    pub fn with_federation(mut self, federation: FederationConfig) -> Self {
        self.federation = Some(federation);
        self
    }

    pub fn with_uploads(mut self, uploads: UploadConfig) -> Self {
        self.uploads = Some(uploads);
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::idempotency::IdempotencyCache;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: schoolcms_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// On-disk storage for entity attachments.
    pub uploads: Arc<UploadStore>,
    /// Recently seen `Idempotency-Key` values for user registration.
    pub idempotency: Arc<IdempotencyCache>,
}

impl AppState {
    /// Build the state, deriving the upload store and idempotency cache from `config`.
    pub fn new(pool: schoolcms_db::DbPool, config: ServerConfig) -> Self {
        let uploads = UploadStore::new(config.upload_dir.clone(), config.base_url.clone());
        let idempotency = IdempotencyCache::new(
            Duration::from_secs(config.idempotency_ttl_secs),
            config.idempotency_capacity,
        );
        Self {
            pool,
            config: Arc::new(config),
            uploads: Arc::new(uploads),
            idempotency: Arc::new(idempotency),
        }
    }
}

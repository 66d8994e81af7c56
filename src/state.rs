use std::sync::Arc;

use schoolhub_config::{
    CorsConfig, EmailConfig, JwtConfig, RateLimitConfig, ServerConfig, StorageConfig,
};
use schoolhub_core::{FileStorage, LocalFileStorage};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub server_config: ServerConfig,
    pub storage_config: StorageConfig,
    pub storage: Arc<dyn FileStorage>,
}

impl AppState {
    /// State for the running server, configured from the environment.
    pub fn from_env(db: PgPool) -> Self {
        let storage_config = StorageConfig::from_env();
        let storage = Arc::new(LocalFileStorage::with_max_size(
            storage_config.dir.clone(),
            storage_config.base_url.clone(),
            storage_config.max_upload_bytes(),
        ));

        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            email_config: EmailConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
            server_config: ServerConfig::from_env(),
            storage_config,
            storage,
        }
    }
}

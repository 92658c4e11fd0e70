pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoDb;
pub use memory::InMemoryStore;
pub use metrics::{get_metrics, init_metrics};
pub use store::CharacterStore;

use crate::config::{CharacterConfig, StoreBackend};
use service_core::error::AppError;
use std::sync::Arc;

/// Builds the store selected by configuration. Called once at startup.
pub async fn connect_store(config: &CharacterConfig) -> Result<Arc<dyn CharacterStore>, AppError> {
    match config.store.backend {
        StoreBackend::MongoDb => {
            let mongo = config.mongodb.as_ref().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!(
                    "MongoDB settings are required for the mongodb store backend"
                ))
            })?;
            let db = MongoDb::connect(mongo, &config.store.collection).await?;
            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory character store; data is lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

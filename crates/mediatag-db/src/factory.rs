#[cfg(feature = "store-memory")]
use crate::MemoryStore;
#[cfg(feature = "store-redis")]
use crate::RedisStore;
use crate::{CatalogStore, CatalogStoreKind, StoreError, StoreResult};
use mediatag_core::Config;
use std::sync::Arc;

/// Create a catalog store based on configuration
pub async fn create_store(config: &Config) -> StoreResult<Arc<dyn CatalogStore>> {
    match config.catalog_store() {
        #[cfg(feature = "store-redis")]
        CatalogStoreKind::Redis => {
            let redis_url = config.redis_url().ok_or_else(|| {
                StoreError::Connection("REDIS_URL not configured".to_string())
            })?;

            let store = RedisStore::new(redis_url).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-redis"))]
        CatalogStoreKind::Redis => Err(StoreError::Connection(
            "Redis store not available (store-redis feature not enabled)".to_string(),
        )),

        #[cfg(feature = "store-memory")]
        CatalogStoreKind::Memory => {
            tracing::warn!("Using in-memory catalog store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }

        #[cfg(not(feature = "store-memory"))]
        CatalogStoreKind::Memory => Err(StoreError::Connection(
            "Memory store not available (store-memory feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "store-memory"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory_store() {
        let config = Config::from_lookup(|key| match key {
            "S3_BUCKET" => Some("media".to_string()),
            "CATALOG_STORE" => Some("memory".to_string()),
            _ => None,
        })
        .unwrap();

        let store = create_store(&config).await.unwrap();
        assert_eq!(store.backend_type(), CatalogStoreKind::Memory);
        assert!(store.ping().await.is_ok());
    }
}

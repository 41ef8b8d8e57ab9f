use crate::models::BreedRecord;
use crate::services::store::{EntityStore, StoreError};
use std::sync::Arc;
use std::time::Duration;

const CATALOG_KEY: &str = "breeds:all";

/// In-process cache of the breed catalog
///
/// Breed search and listing read the full catalog on every request, so the
/// list is held for `ttl` and shared across workers. Imports and deletes run
/// in the admin process, so the server only sees them once the entry expires.
pub struct CatalogCache {
    store: Arc<dyn EntityStore>,
    entries: moka::future::Cache<&'static str, Arc<Vec<BreedRecord>>>,
}

impl CatalogCache {
    pub fn new(store: Arc<dyn EntityStore>, capacity: u64, ttl: Duration) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity.max(1))
            .time_to_live(ttl)
            .build();

        Self { store, entries }
    }

    /// Current catalog, loading it from the store on a miss
    pub async fn breeds(&self) -> Result<Arc<Vec<BreedRecord>>, StoreError> {
        if let Some(breeds) = self.entries.get(CATALOG_KEY).await {
            tracing::trace!("Catalog cache hit");
            return Ok(breeds);
        }

        tracing::trace!("Catalog cache miss");
        let breeds = Arc::new(self.store.list_breeds().await?);
        self.entries.insert(CATALOG_KEY, breeds.clone()).await;

        Ok(breeds)
    }
}

//! DogMate Algo - geocoding, breed search and breeding matches for the DogMate marketplace
//!
//! This library holds the address resolver and the paced bulk geocoder, breed
//! keyword indexing and search, and dog-to-dog match scoring. The HTTP service
//! and the admin CLI are thin hosts around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::{DatabaseSettings, LoggingSettings};
use crate::services::{EntityStore, InMemoryStore, PostgresStore, StoreError};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// Re-export commonly used types
pub use crate::core::{AddressResolver, BulkGeocodeCoordinator, FallbackTable, Matcher};
pub use crate::models::{Address, BreedRecord, Coordinate, Dog, MatchResult, ScoringWeights};

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `LOG_LEVEL`, which wins over the configured level.
/// `LOG_FORMAT=pretty` switches from JSON lines to human-readable output.
pub fn init_tracing(settings: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.format.clone());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

/// Open the configured store: Postgres when a URL is set, otherwise in-memory
pub async fn open_store(settings: &DatabaseSettings) -> Result<Arc<dyn EntityStore>, StoreError> {
    match settings.url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => {
            let max_connections = settings.max_connections.unwrap_or(10);
            let store = PostgresStore::new(
                url,
                max_connections,
                settings.min_connections.unwrap_or(1),
                settings.acquire_timeout(),
            )
            .await?;

            tracing::info!("PostgreSQL store initialized (max: {} connections)", max_connections);
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("No database URL configured, using the in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

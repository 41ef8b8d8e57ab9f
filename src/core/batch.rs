use crate::core::geocode::{AddressResolver, FallbackTable, Resolution};
use crate::models::{BatchReport, Coordinate, Dog};
use crate::services::store::{EntityStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Lowest pacing the provider's usage policy allows (one request per second)
pub const MIN_PROVIDER_INTERVAL: Duration = Duration::from_millis(1000);

/// Progress notification emitted once per processed dog
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeEvent {
    Resolved {
        dog_id: Uuid,
        name: String,
        coordinate: Coordinate,
    },
    FallbackUsed {
        dog_id: Uuid,
        name: String,
        city: String,
        coordinate: Coordinate,
    },
    Failed {
        dog_id: Uuid,
        name: String,
        reason: String,
    },
}

/// Geocodes dogs that have no coordinates, one at a time
///
/// Dogs are processed strictly in order and the coordinator sleeps between
/// dogs so the provider never sees more than one request per interval. A
/// failure on one dog is counted and the batch moves on.
pub struct BulkGeocodeCoordinator {
    resolver: AddressResolver,
    fallback: Arc<FallbackTable>,
    store: Arc<dyn EntityStore>,
    min_interval: Duration,
}

impl BulkGeocodeCoordinator {
    pub fn new(
        resolver: AddressResolver,
        fallback: Arc<FallbackTable>,
        store: Arc<dyn EntityStore>,
        min_interval: Duration,
    ) -> Self {
        Self {
            resolver,
            fallback,
            store,
            min_interval: min_interval.max(MIN_PROVIDER_INTERVAL),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Load every dog lacking coordinates and geocode them
    ///
    /// Failing to enumerate dogs is the only error returned.
    pub async fn run<F>(&self, on_event: F) -> Result<BatchReport, StoreError>
    where
        F: FnMut(GeocodeEvent),
    {
        let dogs = self.store.dogs_missing_coordinates().await?;
        tracing::info!("Found {} dogs without coordinates", dogs.len());

        Ok(self.resolve_batch(dogs, on_event).await)
    }

    /// Geocode the given dogs in order, persisting every coordinate found
    pub async fn resolve_batch<F>(&self, dogs: Vec<Dog>, mut on_event: F) -> BatchReport
    where
        F: FnMut(GeocodeEvent),
    {
        let mut report = BatchReport::default();
        let total = dogs.len();

        for (index, dog) in dogs.into_iter().enumerate() {
            let event = self.process(&dog).await;

            match event {
                GeocodeEvent::Failed { .. } => report.failure_count += 1,
                _ => report.success_count += 1,
            }
            report.total_processed += 1;
            on_event(event);

            if index + 1 < total {
                tokio::time::sleep(self.min_interval).await;
            }
        }

        tracing::info!(
            "Geocoding complete: {} succeeded, {} failed",
            report.success_count,
            report.failure_count
        );

        report
    }

    async fn process(&self, dog: &Dog) -> GeocodeEvent {
        let address = dog.location();

        let Some(resolution) = self.resolver.resolve_with_fallback(&address, &self.fallback).await else {
            return GeocodeEvent::Failed {
                dog_id: dog.id,
                name: dog.name.clone(),
                reason: "could not geocode".to_string(),
            };
        };

        let coordinate = resolution.coordinate();
        if let Err(e) = self.store.set_dog_coordinates(dog.id, coordinate).await {
            tracing::error!("Failed to store coordinates for {}: {}", dog.id, e);
            return GeocodeEvent::Failed {
                dog_id: dog.id,
                name: dog.name.clone(),
                reason: e.to_string(),
            };
        }

        match resolution {
            Resolution::Provider(_) => GeocodeEvent::Resolved {
                dog_id: dog.id,
                name: dog.name.clone(),
                coordinate,
            },
            Resolution::Fallback(_) => GeocodeEvent::FallbackUsed {
                dog_id: dog.id,
                name: dog.name.clone(),
                city: address.city.unwrap_or_default(),
                coordinate,
            },
        }
    }
}

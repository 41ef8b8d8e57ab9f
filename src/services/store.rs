use crate::models::{BreedField, BreedRecord, CategoryCount, Coordinate, Dog};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when reading or writing the entity store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Persistence operations the geocoder, breed indexer and matcher rely on
///
/// Handles are constructed once and passed explicitly to whatever needs them.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Dogs with either coordinate half unset
    async fn dogs_missing_coordinates(&self) -> Result<Vec<Dog>, StoreError>;

    /// Persist a resolved coordinate onto a dog
    async fn set_dog_coordinates(&self, dog_id: Uuid, coordinate: Coordinate) -> Result<(), StoreError>;

    async fn get_dog(&self, dog_id: Uuid) -> Result<Option<Dog>, StoreError>;

    /// All dogs with `Active` status
    async fn active_dogs(&self) -> Result<Vec<Dog>, StoreError>;

    async fn get_breed(&self, slug: &str) -> Result<Option<BreedRecord>, StoreError>;

    /// Insert or replace the breed stored under `breed.slug`
    async fn upsert_breed(&self, breed: BreedRecord) -> Result<BreedRecord, StoreError>;

    /// All breeds, ordered by name
    async fn list_breeds(&self) -> Result<Vec<BreedRecord>, StoreError>;

    /// Count breeds grouped by a column, ordered by group name; null groups are dropped
    async fn count_breeds_by(&self, field: BreedField) -> Result<Vec<CategoryCount>, StoreError>;

    /// Remove every breed, returning how many were deleted
    async fn delete_all_breeds(&self) -> Result<u64, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

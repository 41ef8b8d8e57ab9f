use crate::models::{BreedField, BreedRecord, CategoryCount, Coordinate, Dog, DogStatus};
use crate::services::store::{EntityStore, StoreError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Entity store held entirely in memory
///
/// Used by tests and for running the service without a database. Dogs keep
/// their insertion order so batch runs are reproducible.
#[derive(Default)]
pub struct InMemoryStore {
    dogs: RwLock<Vec<Dog>>,
    breeds: RwLock<BTreeMap<String, BreedRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dogs(dogs: Vec<Dog>) -> Self {
        Self {
            dogs: RwLock::new(dogs),
            breeds: RwLock::default(),
        }
    }

    /// Snapshot of every stored dog
    #[cfg(test)]
    pub async fn dogs(&self) -> Vec<Dog> {
        self.dogs.read().await.clone()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn dogs_missing_coordinates(&self) -> Result<Vec<Dog>, StoreError> {
        Ok(self
            .dogs
            .read()
            .await
            .iter()
            .filter(|d| d.latitude.is_none() || d.longitude.is_none())
            .cloned()
            .collect())
    }

    async fn set_dog_coordinates(&self, dog_id: Uuid, coordinate: Coordinate) -> Result<(), StoreError> {
        let mut dogs = self.dogs.write().await;
        let dog = dogs
            .iter_mut()
            .find(|d| d.id == dog_id)
            .ok_or_else(|| StoreError::NotFound(format!("Dog {}", dog_id)))?;

        dog.latitude = Some(coordinate.latitude);
        dog.longitude = Some(coordinate.longitude);
        Ok(())
    }

    async fn get_dog(&self, dog_id: Uuid) -> Result<Option<Dog>, StoreError> {
        Ok(self.dogs.read().await.iter().find(|d| d.id == dog_id).cloned())
    }

    async fn active_dogs(&self) -> Result<Vec<Dog>, StoreError> {
        Ok(self
            .dogs
            .read()
            .await
            .iter()
            .filter(|d| d.status == DogStatus::Active)
            .cloned()
            .collect())
    }

    async fn get_breed(&self, slug: &str) -> Result<Option<BreedRecord>, StoreError> {
        Ok(self.breeds.read().await.get(slug).cloned())
    }

    async fn upsert_breed(&self, breed: BreedRecord) -> Result<BreedRecord, StoreError> {
        let mut breeds = self.breeds.write().await;
        breeds.insert(breed.slug.clone(), breed.clone());
        Ok(breed)
    }

    async fn list_breeds(&self) -> Result<Vec<BreedRecord>, StoreError> {
        let mut breeds: Vec<BreedRecord> = self.breeds.read().await.values().cloned().collect();
        breeds.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(breeds)
    }

    async fn count_breeds_by(&self, field: BreedField) -> Result<Vec<CategoryCount>, StoreError> {
        let breeds = self.breeds.read().await;
        let mut counts: HashMap<String, i64> = HashMap::new();

        for breed in breeds.values() {
            let key = match field {
                BreedField::Type => Some(breed.breed_type.clone()),
                BreedField::Size => breed.size.clone(),
            };
            if let Some(key) = key {
                *counts.entry(key).or_default() += 1;
            }
        }

        let mut counts: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(name, count)| CategoryCount { name, count })
            .collect();
        counts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(counts)
    }

    async fn delete_all_breeds(&self) -> Result<u64, StoreError> {
        let mut breeds = self.breeds.write().await;
        let count = breeds.len() as u64;
        breeds.clear();
        Ok(count)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

use crate::models::domain::{BreedRecord, CategoryCount, Dog, MatchResult, MatchStats};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit.max(1)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedListResponse {
    pub data: Vec<BreedRecord>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedSearchResponse {
    pub data: Vec<BreedRecord>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedTypesResponse {
    pub types: Vec<CategoryCount>,
    pub sizes: Vec<CategoryCount>,
}

/// Short description of the dog a match search was run for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDogSummary {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub gender: crate::models::Gender,
    pub age: i32,
}

impl From<&Dog> for SourceDogSummary {
    fn from(dog: &Dog) -> Self {
        Self {
            id: dog.id,
            name: dog.name.clone(),
            breed: dog.breed.clone(),
            gender: dog.gender,
            age: dog.age,
        }
    }
}

/// A candidate dog together with its score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedDog {
    pub dog: Dog,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub source_dog: SourceDogSummary,
    pub matches: Vec<MatchedDog>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStatsResponse {
    pub stats: MatchStats,
}

/// A dog with its distance from the search origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyDog {
    #[serde(flatten)]
    pub dog: Dog,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub dogs: Vec<NearbyDog>,
    pub pagination: Pagination,
}

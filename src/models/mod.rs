// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Address, BatchReport, BoundingBox, BreedField, BreedRecord, BreedSize, CategoryCount,
    Coordinate, Dog, DogStatus, Gender, MatchResult, MatchStats, ScoringWeights,
};
pub use requests::{BreedListQuery, BreedSearchQuery, FindMatchesQuery, NearbyQuery};
pub use responses::{
    BreedListResponse, BreedSearchResponse, BreedTypesResponse, ErrorResponse,
    FindMatchesResponse, HealthResponse, MatchStatsResponse, MatchedDog, NearbyDog,
    NearbyResponse, Pagination, SourceDogSummary,
};

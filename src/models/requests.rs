use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for breed search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query string for the breed listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BreedListQuery {
    #[serde(rename = "type", default)]
    pub breed_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: usize,
    #[serde(default = "default_breed_page_size")]
    #[validate(range(min = 1))]
    pub limit: usize,
    #[serde(rename = "sortBy", alias = "sort_by", default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_breed_page_size() -> usize {
    50
}

/// Query string for finding breeding partners
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesQuery {
    #[serde(default)]
    #[validate(range(min = 1))]
    pub limit: Option<usize>,
    #[serde(rename = "minScore", alias = "min_score", default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_score: Option<f64>,
}

/// Query string for the radius search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    #[validate(range(min = 0.1, max = 1000.0))]
    pub radius: Option<f64>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: usize,
    #[serde(default = "default_nearby_page_size")]
    #[validate(range(min = 1))]
    pub limit: usize,
}

fn default_nearby_page_size() -> usize {
    20
}

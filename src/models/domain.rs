use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form postal address, as entered on a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(rename = "postalCode", default)]
    pub postal_code: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String { "UK".to_string() }

impl Address {
    /// Address with only a city set
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            country: default_country(),
            ..Default::default()
        }
    }
}

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        valid.then_some(Self { latitude, longitude })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "dog_gender", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    /// Parse a gender filter value, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "dog_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum DogStatus {
    Pending,
    Active,
    Inactive,
}

/// A dog listing. Only the fields the geocoder and matcher need are carried here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub breed: String,
    pub gender: Gender,
    pub age: i32,
    pub available: bool,
    pub vaccinated: bool,
    pub neutered: bool,
    #[serde(default)]
    pub temperament: Vec<String>,
    pub status: DogStatus,
    pub address: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Dog {
    /// Address used for geocoding this listing
    pub fn location(&self) -> Address {
        Address {
            street: self.address.clone(),
            city: self.city.clone(),
            region: self.county.clone(),
            postal_code: self.postcode.clone(),
            country: self
                .country
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(default_country),
        }
    }

    /// Stored coordinate, if both halves are present
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
            _ => None,
        }
    }
}

/// A kennel-club breed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BreedRecord {
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub breed_type: String,
    pub kennel_club_category: Option<String>,
    pub size: Option<String>,
    /// Small/Medium/Large class parsed from `size`
    #[serde(default)]
    pub size_class: Option<BreedSize>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub color: Option<String>,
    pub longevity: Option<String>,
    pub health_problems: Option<String>,
    pub image_url: Option<String>,
    pub official_link: Option<String>,
    pub exercise_needs: Option<String>,
    pub grooming: Option<String>,
    pub temperament: Option<String>,
    pub good_with_children: Option<String>,
    #[serde(default)]
    pub search_keywords: Vec<String>,
}

impl BreedRecord {
    /// Minimal record with derived slug and keywords
    pub fn new(name: &str, breed_type: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: crate::core::keywords::slugify(name),
            breed_type: breed_type.to_string(),
            kennel_club_category: None,
            size: None,
            size_class: None,
            height: None,
            weight: None,
            color: None,
            longevity: None,
            health_problems: None,
            image_url: None,
            official_link: None,
            exercise_needs: None,
            grooming: None,
            temperament: None,
            good_with_children: None,
            search_keywords: crate::core::keywords::derive_keywords(name, Some(breed_type), None),
        }
    }

    /// Recompute slug, keywords and size class from the descriptive fields
    pub fn reindex(&mut self) {
        self.slug = crate::core::keywords::slugify(&self.name);
        self.size_class = self.size.as_deref().and_then(crate::core::keywords::normalize_size);
        self.search_keywords = crate::core::keywords::derive_keywords(
            &self.name,
            Some(&self.breed_type),
            self.kennel_club_category.as_deref(),
        );
    }
}

/// Coarse size class derived from the free-text size column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "breed_size", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum BreedSize {
    Small,
    Medium,
    Large,
}

/// Breed columns that can be aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreedField {
    Type,
    Size,
}

/// One row of a group-by count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryCount {
    pub name: String,
    pub count: i64,
}

/// Scored breeding match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "dogId")]
    pub dog_id: Uuid,
    #[serde(rename = "matchScore")]
    pub score: f64,
    #[serde(rename = "matchReasons")]
    pub reasons: Vec<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

impl MatchResult {
    /// Keep only the first `count` reasons
    pub fn truncate_reasons(&mut self, count: usize) {
        self.reasons.truncate(count);
    }
}

/// Aggregate counts for a source dog's potential partners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub total_potential: usize,
    pub same_breed: usize,
    pub nearby: usize,
    pub breed_compatibility: u32,
}

/// Outcome of a bulk geocoding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub total_processed: usize,
}

/// Points available per match criterion
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub breed: f64,
    pub age: f64,
    pub health: f64,
    pub distance: f64,
    pub temperament: f64,
    pub neutered_penalty: f64,
}

impl ScoringWeights {
    /// Points earned by a perfect match
    pub fn max_points(&self) -> f64 {
        self.breed + self.age + self.health + self.distance + self.temperament
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            breed: 50.0,
            age: 20.0,
            health: 20.0,
            distance: 30.0,
            temperament: 10.0,
            neutered_penalty: 50.0,
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

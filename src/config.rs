use crate::core::search::SearchLimits;
use crate::models::ScoringWeights;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Without a URL the service runs on the in-memory store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs.unwrap_or(5))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_min_interval")]
    pub min_interval_ms: u64,
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoding_endpoint(),
            user_agent: default_user_agent(),
            default_country_code: default_country_code(),
            timeout_secs: default_geocoding_timeout(),
            min_interval_ms: default_min_interval(),
        }
    }
}

impl GeocodingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

fn default_geocoding_endpoint() -> String { "https://nominatim.openstreetmap.org".to_string() }
fn default_user_agent() -> String { "DogMate/1.0 (dog-breeding-website)".to_string() }
fn default_country_code() -> String { "gb".to_string() }
fn default_geocoding_timeout() -> u64 { 5 }
fn default_min_interval() -> u64 { 1100 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,
    #[serde(default = "default_search_max_limit")]
    pub max_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
            max_limit: default_search_max_limit(),
        }
    }
}

impl SearchSettings {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            default_limit: self.default_limit,
            max_limit: self.max_limit,
        }
    }
}

fn default_search_limit() -> usize { 20 }
fn default_search_max_limit() -> usize { 50 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_match_limit")]
    pub default_limit: usize,
    #[serde(default = "default_match_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_reason_display_count")]
    pub reason_display_count: usize,
    #[serde(default = "default_nearby_radius")]
    pub nearby_radius_km: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_match_limit(),
            max_limit: default_match_max_limit(),
            min_score: default_min_score(),
            reason_display_count: default_reason_display_count(),
            nearby_radius_km: default_nearby_radius(),
        }
    }
}

fn default_match_limit() -> usize { 20 }
fn default_match_max_limit() -> usize { 50 }
fn default_min_score() -> f64 { 25.0 }
fn default_reason_display_count() -> usize { 3 }
fn default_nearby_radius() -> f64 { 50.0 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Points per match criterion
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_breed_weight")]
    pub breed: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_health_weight")]
    pub health: f64,
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_temperament_weight")]
    pub temperament: f64,
    #[serde(default = "default_neutered_penalty")]
    pub neutered_penalty: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            breed: default_breed_weight(),
            age: default_age_weight(),
            health: default_health_weight(),
            distance: default_distance_weight(),
            temperament: default_temperament_weight(),
            neutered_penalty: default_neutered_penalty(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            breed: config.breed,
            age: config.age,
            health: config.health,
            distance: config.distance,
            temperament: config.temperament,
            neutered_penalty: config.neutered_penalty,
        }
    }
}

fn default_breed_weight() -> f64 { 50.0 }
fn default_age_weight() -> f64 { 20.0 }
fn default_health_weight() -> f64 { 20.0 }
fn default_distance_weight() -> f64 { 30.0 }
fn default_temperament_weight() -> f64 { 10.0 }
fn default_neutered_penalty() -> f64 { 50.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_catalog_ttl")]
    pub catalog_ttl_secs: u64,
    #[serde(default = "default_catalog_capacity")]
    pub catalog_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            catalog_ttl_secs: default_catalog_ttl(),
            catalog_capacity: default_catalog_capacity(),
        }
    }
}

impl CacheSettings {
    pub fn catalog_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog_ttl_secs)
    }
}

fn default_catalog_ttl() -> u64 { 300 }
fn default_catalog_capacity() -> u64 { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    Environment::with_prefix("DOGMATE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DOGMATE__)
    /// 5. DATABASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. DOGMATE__SERVER__PORT -> server.port
            .add_source(environment());

        with_database_override(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment());

        with_database_override(builder)?.build()?.try_deserialize()
    }
}

fn with_database_override(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => builder.set_override("database.url", url),
        _ => Ok(builder),
    }
}

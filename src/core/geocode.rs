use crate::models::{Address, Coordinate};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while talking to a geocoding provider
///
/// These never escape [`AddressResolver::resolve`]; they are logged and
/// treated the same as an empty result.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Coordinate out of range: {0}, {1}")]
    InvalidCoordinate(f64, f64),
}

/// A single free-text lookup against a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeQuery {
    pub text: String,
    /// ISO 3166-1 alpha-2, lower-case
    pub country_code: String,
    pub limit: u8,
}

/// Remote geocoding backend
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Return zero or more candidates, best first
    async fn search(&self, query: &GeocodeQuery) -> Result<Vec<Coordinate>, GeocodeError>;
}

/// Where a resolved coordinate came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Provider(Coordinate),
    Fallback(Coordinate),
}

impl Resolution {
    pub fn coordinate(&self) -> Coordinate {
        match self {
            Resolution::Provider(c) | Resolution::Fallback(c) => *c,
        }
    }
}

/// Map a free-text country to the provider's country filter
///
/// Two-letter codes pass through; a handful of UK spellings map to `gb`;
/// anything else uses `default_code`.
pub fn country_code_for(country: &str, default_code: &str) -> String {
    let normalized = country.trim().to_lowercase();

    match normalized.as_str() {
        "uk" | "gb" | "united kingdom" | "great britain" | "england" | "scotland" | "wales"
        | "northern ireland" => "gb".to_string(),
        code if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => code.to_string(),
        _ => default_code.to_lowercase(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn join_parts(parts: &[Option<&str>]) -> String {
    parts.iter().flatten().copied().collect::<Vec<_>>().join(", ")
}

/// Turns addresses into coordinates using a remote provider
///
/// The first lookup uses every address part. When it finds nothing and the
/// address carried a street or postal code, one more lookup is made with only
/// city, region and country. Nothing is cached here.
#[derive(Clone)]
pub struct AddressResolver {
    provider: Arc<dyn GeocodeProvider>,
    default_country_code: String,
}

impl AddressResolver {
    pub fn new(provider: Arc<dyn GeocodeProvider>, default_country_code: impl Into<String>) -> Self {
        Self {
            provider,
            default_country_code: default_country_code.into(),
        }
    }

    /// Resolve an address through the provider. `None` means not found.
    pub async fn resolve(&self, address: &Address) -> Option<Coordinate> {
        let street = non_empty(address.street.as_deref());
        let city = non_empty(address.city.as_deref());
        let region = non_empty(address.region.as_deref());
        let postal_code = non_empty(address.postal_code.as_deref());
        let country = non_empty(Some(address.country.as_str()));

        if street.is_none() && city.is_none() && region.is_none() && postal_code.is_none() {
            debug!("Address has no locality parts, skipping provider lookup");
            return None;
        }

        let country_code = country_code_for(country.unwrap_or_default(), &self.default_country_code);

        let full_query = join_parts(&[street, city, region, postal_code, country]);
        if let Some(coordinate) = self.lookup(full_query, &country_code).await {
            return Some(coordinate);
        }

        let was_specific = street.is_some() || postal_code.is_some();
        if was_specific && (city.is_some() || region.is_some()) {
            let reduced_query = join_parts(&[city, region, country]);
            return self.lookup(reduced_query, &country_code).await;
        }

        None
    }

    /// Resolve through the provider, then through the fallback table by city
    pub async fn resolve_with_fallback(
        &self,
        address: &Address,
        fallback: &FallbackTable,
    ) -> Option<Resolution> {
        if let Some(coordinate) = self.resolve(address).await {
            return Some(Resolution::Provider(coordinate));
        }

        address
            .city
            .as_deref()
            .and_then(|city| fallback.lookup(city))
            .map(Resolution::Fallback)
    }

    async fn lookup(&self, text: String, country_code: &str) -> Option<Coordinate> {
        let query = GeocodeQuery {
            text,
            country_code: country_code.to_string(),
            limit: 1,
        };

        match self.provider.search(&query).await {
            Ok(results) => {
                let first = results.into_iter().next();
                if first.is_none() {
                    debug!(query = %query.text, "Geocoding provider returned no results");
                }
                first
            }
            Err(e) => {
                warn!(query = %query.text, error = %e, "Geocoding provider failed");
                None
            }
        }
    }
}

/// Static city → coordinate table consulted when live geocoding fails
///
/// Keys are trimmed and lower-cased; lookups are exact.
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    entries: HashMap<String, Coordinate>,
}

impl FallbackTable {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinate)>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(city, coordinate)| (Self::normalize(city.as_ref()), coordinate))
                .collect(),
        }
    }

    /// Built-in table of UK cities
    pub fn uk_cities() -> Self {
        Self::from_entries(UK_CITY_COORDINATES.iter().map(|&(city, latitude, longitude)| {
            (city, Coordinate { latitude, longitude })
        }))
    }

    #[inline]
    fn normalize(city: &str) -> String {
        city.trim().to_lowercase()
    }

    /// Exact, case-insensitive lookup by city name
    pub fn lookup(&self, city: &str) -> Option<Coordinate> {
        let key = Self::normalize(city);
        if key.is_empty() {
            return None;
        }
        self.entries.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const UK_CITY_COORDINATES: &[(&str, f64, f64)] = &[
    ("london", 51.5074, -0.1278),
    ("manchester", 53.4808, -2.2426),
    ("birmingham", 52.4862, -1.8904),
    ("leeds", 53.8008, -1.5491),
    ("glasgow", 55.8642, -4.2518),
    ("liverpool", 53.4084, -2.9916),
    ("edinburgh", 55.9533, -3.1883),
    ("bristol", 51.4545, -2.5879),
    ("sheffield", 53.3811, -1.4701),
    ("newcastle", 54.9783, -1.6178),
    ("nottingham", 52.9548, -1.1581),
    ("cardiff", 51.4816, -3.1791),
    ("belfast", 54.5973, -5.9301),
    ("leicester", 52.6369, -1.1398),
    ("coventry", 52.4068, -1.5197),
    ("bradford", 53.7960, -1.7594),
    ("southampton", 50.9097, -1.4044),
    ("portsmouth", 50.8198, -1.0880),
    ("brighton", 50.8225, -0.1372),
    ("plymouth", 50.3755, -4.1427),
    ("reading", 51.4543, -0.9781),
    ("derby", 52.9225, -1.4746),
    ("wolverhampton", 52.5870, -2.1288),
    ("swansea", 51.6214, -3.9436),
    ("aberdeen", 57.1497, -2.0943),
    ("cambridge", 52.2053, 0.1218),
    ("oxford", 51.7520, -1.2577),
    ("york", 53.9600, -1.0873),
    ("bath", 51.3811, -2.3590),
    ("exeter", 50.7184, -3.5339),
    ("norwich", 52.6309, 1.2974),
    ("chester", 53.1930, -2.8931),
    ("canterbury", 51.2802, 1.0789),
    ("dundee", 56.4620, -2.9707),
    ("inverness", 57.4778, -4.2247),
    ("worcester", 52.1936, -2.2216),
    ("gloucester", 51.8642, -2.2382),
    ("lincoln", 53.2307, -0.5406),
    ("peterborough", 52.5695, -0.2405),
    ("ipswich", 52.0567, 1.1482),
    ("stoke-on-trent", 53.0027, -2.1794),
    ("sunderland", 54.9069, -1.3838),
    ("hull", 53.7676, -0.3274),
    ("middlesbrough", 54.5742, -1.2350),
    ("blackpool", 53.8175, -3.0357),
    ("bolton", 53.5785, -2.4299),
    ("bournemouth", 50.7192, -1.8808),
    ("stockport", 53.4106, -2.1575),
    ("warrington", 53.3900, -2.5970),
    ("slough", 51.5105, -0.5950),
    ("luton", 51.8787, -0.4200),
    ("colchester", 51.8959, 0.8919),
    ("crawley", 51.1092, -0.1872),
    ("cheltenham", 51.8994, -2.0783),
];

use crate::core::geocode::{GeocodeError, GeocodeProvider, GeocodeQuery};
use crate::models::Coordinate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// One search hit; Nominatim encodes coordinates as decimal strings
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl Place {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        let latitude: f64 = self
            .lat
            .trim()
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("Bad latitude: {}", self.lat)))?;
        let longitude: f64 = self
            .lon
            .trim()
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("Bad longitude: {}", self.lon)))?;

        Coordinate::new(latitude, longitude).ok_or(GeocodeError::InvalidCoordinate(latitude, longitude))
    }
}

/// OpenStreetMap Nominatim search client
///
/// Sends the configured `User-Agent` on every request, as the public
/// Nominatim usage policy requires.
pub struct NominatimClient {
    endpoint: String,
    client: Client,
}

impl NominatimClient {
    pub fn new(endpoint: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder().user_agent(user_agent).timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl GeocodeProvider for NominatimClient {
    async fn search(&self, query: &GeocodeQuery) -> Result<Vec<Coordinate>, GeocodeError> {
        let url = format!("{}/search", self.endpoint.trim_end_matches('/'));
        let limit = query.limit.to_string();

        tracing::debug!("Geocoding \"{}\" via {}", query.text, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.text.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("countrycodes", query.country_code.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status()));
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        places.iter().map(Place::coordinate).collect()
    }
}

use crate::core::keywords::{derive_keywords, normalize_size, sanitize, slugify};
use crate::models::BreedRecord;
use crate::services::store::EntityStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

const DEFAULT_BREED_TYPE: &str = "Non-Sporting";
const DEFAULT_COLOR: &str = "Various";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read breed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse breed file: {0}")]
    Json(#[from] serde_json::Error),
}

/// One breed as published in the kennel-club JSON export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBreed {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub breed_type: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub color: Option<String>,
    pub longevity: Option<String>,
    pub health_problems: Option<String>,
    pub image_url: Option<String>,
    pub official_link: Option<String>,
    pub kennel_club_category: Option<String>,
    pub size: Option<String>,
    pub exercise_needs: Option<String>,
    pub grooming: Option<String>,
    pub temperament: Option<String>,
    pub good_with_children: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub skipped_count: usize,
    pub failed_names: Vec<String>,
}

/// Clean a raw record into a storable breed, or `None` if it has no name
pub fn prepare_breed(raw: &RawBreed) -> Option<BreedRecord> {
    let name = sanitize(raw.name.as_deref())?;
    let breed_type = sanitize(raw.breed_type.as_deref()).unwrap_or_else(|| DEFAULT_BREED_TYPE.to_string());
    let kennel_club_category = sanitize(raw.kennel_club_category.as_deref());
    let size = sanitize(raw.size.as_deref());

    Some(BreedRecord {
        slug: slugify(&name),
        search_keywords: derive_keywords(&name, Some(&breed_type), kennel_club_category.as_deref()),
        name,
        breed_type,
        kennel_club_category,
        size_class: size.as_deref().and_then(normalize_size),
        size,
        height: sanitize(raw.height.as_deref()),
        weight: sanitize(raw.weight.as_deref()),
        color: Some(sanitize(raw.color.as_deref()).unwrap_or_else(|| DEFAULT_COLOR.to_string())),
        longevity: sanitize(raw.longevity.as_deref()),
        health_problems: sanitize(raw.health_problems.as_deref()),
        image_url: sanitize(raw.image_url.as_deref()),
        official_link: sanitize(raw.official_link.as_deref()),
        exercise_needs: sanitize(raw.exercise_needs.as_deref()),
        grooming: sanitize(raw.grooming.as_deref()),
        temperament: sanitize(raw.temperament.as_deref()),
        good_with_children: sanitize(raw.good_with_children.as_deref()),
    })
}

/// Loads kennel-club breed data into the store
pub struct BreedImporter {
    store: Arc<dyn EntityStore>,
}

impl BreedImporter {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Read a JSON array of raw breeds from disk
    pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<RawBreed>, ImportError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Upsert every record by slug
    ///
    /// A failing record is counted and named in the report; the rest of the
    /// import carries on.
    pub async fn import(&self, records: &[RawBreed]) -> ImportReport {
        let mut report = ImportReport::default();
        let total = records.len();

        for raw in records {
            let Some(breed) = prepare_breed(raw) else {
                debug!("Skipping breed record with empty name");
                report.skipped_count += 1;
                continue;
            };

            let name = breed.name.clone();
            debug!(name = %name, slug = %breed.slug, breed_type = %breed.breed_type, "Importing breed");

            match self.store.upsert_breed(breed).await {
                Ok(_) => {
                    report.success_count += 1;
                    debug!("{}/{}: {}", report.success_count, total, name);
                }
                Err(e) => {
                    warn!(name = %name, error = %e, "Failed to import breed");
                    report.failure_count += 1;
                    report.failed_names.push(name);
                }
            }
        }

        info!(
            success = report.success_count,
            failed = report.failure_count,
            skipped = report.skipped_count,
            "Breed import complete"
        );

        report
    }
}

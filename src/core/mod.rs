// Core algorithm exports
pub mod batch;
pub mod distance;
pub mod filters;
pub mod geocode;
pub mod import;
pub mod keywords;
pub mod matcher;
pub mod scoring;
pub mod search;

pub use batch::{BulkGeocodeCoordinator, GeocodeEvent};
pub use distance::{calculate_bounding_box, distance_between, haversine_distance, is_within_bounding_box};
pub use filters::{is_eligible_partner, BreedFilter, BreedSort, DogFilter};
pub use geocode::{AddressResolver, FallbackTable, GeocodeError, GeocodeProvider, GeocodeQuery, Resolution};
pub use import::{BreedImporter, ImportReport, RawBreed};
pub use keywords::{derive_keywords, normalize_size, slugify};
pub use matcher::{MatchOutcome, Matcher};
pub use scoring::score;
pub use search::{search, SearchLimits, ValidationError};

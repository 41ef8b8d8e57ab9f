// Service exports
pub mod cache;
pub mod memory;
pub mod nominatim;
pub mod postgres;
pub mod store;

pub use cache::CatalogCache;
pub use memory::InMemoryStore;
pub use nominatim::NominatimClient;
pub use postgres::PostgresStore;
pub use store::{EntityStore, StoreError};

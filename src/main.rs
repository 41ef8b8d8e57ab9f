use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpServer};
use dogmate_algo::config::Settings;
use dogmate_algo::core::Matcher;
use dogmate_algo::models::ScoringWeights;
use dogmate_algo::routes::{self, ApiError, AppState};
use dogmate_algo::services::CatalogCache;
use std::sync::Arc;
use tracing::{error, info};

/// Handle query string errors
fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ApiError::BadRequest(format!("Invalid query: {}", err)).into()
}

/// Handle path segment errors
fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("Invalid path: {}", err)).into()
}

fn config_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("Configuration error: {}", e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(config_error)?;

    dogmate_algo::init_tracing(&settings.logging);

    info!("Starting DogMate matching service...");

    let store = dogmate_algo::open_store(&settings.database).await.map_err(|e| {
        error!("Failed to open store: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let catalog = Arc::new(CatalogCache::new(
        store.clone(),
        settings.cache.catalog_capacity,
        settings.cache.catalog_ttl(),
    ));

    info!(
        "Breed catalog cache initialized (TTL: {}s)",
        settings.cache.catalog_ttl_secs
    );

    // Initialize matcher with configured weights
    let weights = ScoringWeights::from(&settings.scoring.weights);
    let matcher = Matcher::new(weights, settings.matching.reason_display_count);

    info!("Matcher initialized with weights: {:?}", matcher.weights());

    let app_state = AppState {
        store,
        catalog,
        matcher,
        search: settings.search.limits(),
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

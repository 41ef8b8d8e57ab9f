use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dogmate_algo::config::Settings;
use dogmate_algo::core::{
    AddressResolver, BreedImporter, BulkGeocodeCoordinator, FallbackTable, GeocodeEvent, Resolution,
};
use dogmate_algo::models::{Address, BreedField};
use dogmate_algo::services::{EntityStore, NominatimClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Grace period before deleting breeds without --yes
const DELETE_GRACE: Duration = Duration::from_secs(5);

/// Maintenance jobs for the DogMate database
#[derive(Debug, Parser)]
#[command(name = "dogmate-admin", version, about = "Batch jobs for the DogMate marketplace")]
struct CliArgs {
    /// Path to a configuration file (default: config/default.toml and config/local.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Geocode every dog that has no coordinates yet
    GeocodeDogs {
        /// Pause between provider requests in milliseconds (never below 1000)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Import kennel-club breeds from a JSON file
    ImportBreeds {
        /// JSON array of breed records
        path: String,
    },

    /// Delete every breed
    DeleteBreeds {
        /// Skip the grace period
        #[arg(long)]
        yes: bool,
    },

    /// Show breed counts by type and size
    BreedStats,

    /// Resolve a single address without touching the database
    Resolve {
        #[arg(long)]
        city: String,
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        county: Option<String>,
        #[arg(long)]
        postcode: Option<String>,
        #[arg(long, default_value = "UK")]
        country: String,
    },
}

async fn open_store(settings: &Settings) -> Result<Arc<dyn EntityStore>> {
    dogmate_algo::open_store(&settings.database)
        .await
        .context("Failed to open store")
}

fn build_resolver(settings: &Settings) -> Result<AddressResolver> {
    let geocoding = &settings.geocoding;
    let provider = NominatimClient::new(&geocoding.endpoint, &geocoding.user_agent, geocoding.timeout())
        .context("Failed to build geocoding client")?;

    Ok(AddressResolver::new(Arc::new(provider), &geocoding.default_country_code))
}

async fn geocode_dogs(settings: &Settings, store: Arc<dyn EntityStore>, interval_ms: Option<u64>) -> Result<()> {
    let interval = interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| settings.geocoding.min_interval());

    let coordinator = BulkGeocodeCoordinator::new(
        build_resolver(settings)?,
        Arc::new(FallbackTable::uk_cities()),
        store,
        interval,
    );

    info!("Geocoding dogs, pausing {}ms between requests", coordinator.min_interval().as_millis());

    let report = coordinator
        .run(|event| match event {
            GeocodeEvent::Resolved { name, coordinate, .. } => {
                info!("{}: {}, {}", name, coordinate.latitude, coordinate.longitude);
            }
            GeocodeEvent::FallbackUsed { name, city, coordinate, .. } => {
                info!("{}: {}, {} (fallback for {})", name, coordinate.latitude, coordinate.longitude, city);
            }
            GeocodeEvent::Failed { name, reason, .. } => {
                warn!("{}: {}", name, reason);
            }
        })
        .await
        .context("Failed to load dogs without coordinates")?;

    println!("Geocoding complete");
    println!("  Success: {}", report.success_count);
    println!("  Failed:  {}", report.failure_count);
    println!("  Total:   {}", report.total_processed);

    Ok(())
}

async fn import_breeds(store: Arc<dyn EntityStore>, path: &str) -> Result<()> {
    let records = BreedImporter::load_file(path).with_context(|| format!("Failed to load {}", path))?;
    info!("Found {} breeds to import", records.len());

    let report = BreedImporter::new(store.clone()).import(&records).await;

    println!("Import complete");
    println!("  Success: {}", report.success_count);
    println!("  Failed:  {}", report.failure_count);
    println!("  Skipped: {}", report.skipped_count);
    if !report.failed_names.is_empty() {
        println!("Failed breeds:");
        for name in &report.failed_names {
            println!("  - {}", name);
        }
    }

    print_counts("Breed type distribution", store.as_ref(), BreedField::Type).await
}

async fn delete_breeds(store: Arc<dyn EntityStore>, yes: bool) -> Result<()> {
    let count = store.list_breeds().await?.len();
    if count == 0 {
        println!("No breeds found. Already empty.");
        return Ok(());
    }

    println!("Found {} breeds to delete", count);
    if !yes {
        println!("Press Ctrl+C to cancel, waiting {} seconds...", DELETE_GRACE.as_secs());
        tokio::time::sleep(DELETE_GRACE).await;
    }

    let deleted = store.delete_all_breeds().await?;
    println!("Deleted {} breeds", deleted);

    Ok(())
}

async fn print_counts(title: &str, store: &dyn EntityStore, field: BreedField) -> Result<()> {
    let counts = store.count_breeds_by(field).await?;

    println!("{}:", title);
    for group in counts {
        println!("  {}: {}", group.name, group.count);
    }

    Ok(())
}

async fn resolve(settings: &Settings, address: Address) -> Result<()> {
    let resolver = build_resolver(settings)?;
    let fallback = FallbackTable::uk_cities();

    match resolver.resolve_with_fallback(&address, &fallback).await {
        Some(Resolution::Provider(c)) => println!("{}, {} (provider)", c.latitude, c.longitude),
        Some(Resolution::Fallback(c)) => println!("{}, {} (fallback table)", c.latitude, c.longitude),
        None => bail!("Address could not be resolved"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = CliArgs::parse();
    let settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("Failed to load configuration")?;

    dogmate_algo::init_tracing(&settings.logging);

    match args.command {
        Commands::Resolve { city, street, county, postcode, country } => {
            let address = Address {
                street,
                city: Some(city),
                region: county,
                postal_code: postcode,
                country,
            };
            resolve(&settings, address).await
        }
        Commands::GeocodeDogs { interval_ms } => {
            geocode_dogs(&settings, open_store(&settings).await?, interval_ms).await
        }
        Commands::ImportBreeds { path } => import_breeds(open_store(&settings).await?, &path).await,
        Commands::DeleteBreeds { yes } => delete_breeds(open_store(&settings).await?, yes).await,
        Commands::BreedStats => {
            let store = open_store(&settings).await?;
            print_counts("Breeds by type", store.as_ref(), BreedField::Type).await?;
            print_counts("Breeds by size", store.as_ref(), BreedField::Size).await
        }
    }
}

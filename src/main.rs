use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chronoglobe::{
    compute_center, compute_view_distance, derive_color, features_missing_codes, load_boundaries_from_path,
    BoundaryFeature, Config, CountryStore, EventCatalog, RestStore, YearOrder,
};

/// Store-check tool: verifies the remote store and boundary document are
/// usable, and with a country-code argument prints that country's metadata
/// and per-category event counts.
#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Required: STORE_URL, STORE_API_KEY");
            eprintln!("Optional: BOUNDARIES_PATH (default: 2025.geojson)");
            std::process::exit(1);
        }
    };

    tracing::info!("Store: {}", config.store_url);
    let store = RestStore::new(&config.store_url, &config.store_api_key);

    match store.all_countries().await {
        Ok(countries) => tracing::info!("Store reachable: {} countries", countries.len()),
        Err(e) => {
            tracing::error!("Store unreachable: {}", e);
            std::process::exit(1);
        }
    }

    let boundaries = load_boundaries(&config);

    let Some(code) = std::env::args().nth(1) else {
        return;
    };
    let code = code.to_uppercase();

    match store.country_by_code(&code).await {
        Ok(Some(country)) => {
            println!("{} ({})", country.name, country.country_code);
            println!("  color: {}", derive_color(&country.name));
            if let Some(capital) = &country.current_capital {
                println!("  capital: {}", capital);
            }
            if let Some(population) = country.current_population {
                println!("  population: {}", population);
            }
            if let Some(region) = &country.region {
                println!("  region: {}", region);
            }
        }
        Ok(None) => tracing::warn!("No country with code {}", code),
        Err(e) => tracing::error!("Country lookup failed: {}", e),
    }

    if let Some(feature) = boundaries
        .iter()
        .find(|f| f.country_code() == Some(code.as_str()))
    {
        match (compute_center(feature), compute_view_distance(feature)) {
            (Ok(center), Ok(distance)) => println!(
                "  center: {:.2}, {:.2} (altitude {:.2})",
                center.lat, center.lng, distance
            ),
            (Err(e), _) | (_, Err(e)) => tracing::error!("Geometry error for {}: {}", code, e),
        }
    }

    let catalog = EventCatalog::new(store);
    let grouped = catalog
        .fetch_events_grouped(&code, None, YearOrder::Descending)
        .await;

    println!("  events by category:");
    for (category, events) in &grouped {
        println!("    {:>16}: {}", category.as_str(), events.len());
    }
}

/// Load the boundary document if present, reporting features that cannot be
/// joined against the store.
fn load_boundaries(config: &Config) -> Vec<BoundaryFeature> {
    if !config.boundaries_path.exists() {
        tracing::info!(
            "No boundary document at {}, skipping",
            config.boundaries_path.display()
        );
        return Vec::new();
    }

    match load_boundaries_from_path(&config.boundaries_path) {
        Ok(features) => {
            tracing::info!(
                "Loaded {} boundary features from {}",
                features.len(),
                config.boundaries_path.display()
            );
            let missing = features_missing_codes(&features);
            if !missing.is_empty() {
                tracing::warn!(
                    "{} features have no usable country code: {}",
                    missing.len(),
                    missing.join(", ")
                );
            }
            features
        }
        Err(e) => {
            tracing::warn!("Failed to load boundary document: {}", e);
            Vec::new()
        }
    }
}
